//! Context-aware completion: command names from a registry-backed trie,
//! flag names from the resolved command's schema, plus a user-managed trie
//! of custom entries.

use crate::shell::registry::CommandRegistry;
use crate::shell::tokenizer::tokenize;
use crate::trie::Trie;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Completing the command name itself.
    Command,
    /// Completing a flag of the named command.
    Flag { command: String },
    /// Completing a positional argument of the named command.
    Argument { command: String },
}

pub struct Autocomplete {
    commands: Trie,
    custom: Trie,
}

impl Autocomplete {
    pub fn new(registry: &CommandRegistry) -> Self {
        let mut ac = Self {
            commands: Trie::new(),
            custom: Trie::new(),
        };
        ac.rebuild(registry);
        ac
    }

    /// Re-index command names. Call after registering or unregistering a
    /// command.
    pub fn rebuild(&mut self, registry: &CommandRegistry) {
        self.commands.clear();
        for name in registry.names() {
            self.commands.insert(&name);
        }
    }

    /// Add a custom entry (completed alongside command names).
    pub fn add_entry(&mut self, entry: &str) {
        self.custom.insert(entry);
    }

    pub fn remove_entry(&mut self, entry: &str) -> bool {
        self.custom.remove(entry)
    }

    pub fn clear_entries(&mut self) {
        self.custom.clear();
    }

    /// Derive what the cursor position at the end of `input` is completing.
    /// Malformed input (unclosed quote, trailing escape) falls back to the
    /// command context.
    pub fn context_of(&self, input: &str) -> CompletionContext {
        if input.is_empty() {
            return CompletionContext::Command;
        }

        let tokens = match tokenize(input) {
            Ok(tokens) if !tokens.is_empty() => tokens,
            _ => return CompletionContext::Command,
        };

        let ends_with_space = input
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_whitespace());

        if tokens.len() == 1 && !ends_with_space {
            return CompletionContext::Command;
        }

        let command = tokens[0].text.clone();

        if !ends_with_space {
            let last = &tokens[tokens.len() - 1];
            if !last.quoted && last.text.starts_with('-') {
                return CompletionContext::Flag { command };
            }
        }

        CompletionContext::Argument { command }
    }

    /// Completion candidates for `input`, in trie order.
    pub fn completions(&self, registry: &CommandRegistry, input: &str) -> Vec<String> {
        let prefix = last_token(input);

        match self.context_of(input) {
            CompletionContext::Command => {
                let mut matches: Vec<String> = self
                    .commands
                    .enumerate(&prefix)
                    .map(str::to_string)
                    .collect();
                matches.extend(self.custom.enumerate(&prefix).map(str::to_string));
                matches
            }
            CompletionContext::Flag { command } => {
                let stripped = prefix.trim_start_matches('-');
                match registry.get(&command) {
                    Some(info) => info
                        .flags
                        .iter()
                        .filter(|spec| spec.name.starts_with(stripped))
                        .map(|spec| format!("--{}", spec.name))
                        .collect(),
                    None => Vec::new(),
                }
            }
            // Arguments have no default source; the custom trie covers
            // callers that want domain completions there.
            CompletionContext::Argument { .. } => Vec::new(),
        }
    }
}

/// The partial token being completed: the text after the last unquoted
/// whitespace run, or empty when the cursor sits after a separator.
fn last_token(input: &str) -> String {
    if input
        .chars()
        .last()
        .is_none_or(|c| c.is_ascii_whitespace())
    {
        return String::new();
    }
    input
        .rsplit(|c: char| c.is_ascii_whitespace())
        .next()
        .unwrap_or("")
        .to_string()
}
