//! Command registry: the central map from command name to its metadata,
//! flag schema, argument bounds, and handler.

use crate::shell::executor::CommandResult;
use crate::shell::parser::ParsedCommand;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command already registered: {0}")]
    Duplicate(String),
}

/// The value type a flag carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagType {
    Str,
    Int,
    Float,
    Bool,
}

/// One declared option on a command. The long name is unique per command;
/// the short letter is optional.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub name: String,
    pub short: Option<char>,
    pub value_type: FlagType,
    pub required: bool,
    pub description: String,
}

impl FlagSpec {
    pub fn new(name: impl Into<String>, value_type: FlagType) -> Self {
        Self {
            name: name.into(),
            short: None,
            value_type,
            required: false,
            description: String::new(),
        }
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Handlers are plain callables over the parsed command. Built-ins capture
/// whatever shared state they need (`Rc<RefCell<_>>` handles); the executor
/// never sees that state.
pub type CommandHandler = Rc<dyn Fn(&ParsedCommand) -> CommandResult>;

/// One registered command. `max_args == 0` means unbounded positionals.
#[derive(Clone)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub help_text: String,
    pub flags: Vec<FlagSpec>,
    pub min_args: usize,
    pub max_args: usize,
    pub hidden: bool,
    pub handler: CommandHandler,
}

impl CommandInfo {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage: String::new(),
            help_text: String::new(),
            flags: Vec::new(),
            min_args: 0,
            max_args: 0,
            hidden: false,
            handler,
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_flags(mut self, flags: Vec<FlagSpec>) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_arg_bounds(mut self, min_args: usize, max_args: usize) -> Self {
        self.min_args = min_args;
        self.max_args = max_args;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Find a flag spec by long name or short letter.
    pub fn find_flag(&self, name: &str, is_short: bool) -> Option<&FlagSpec> {
        self.flags.iter().find(|spec| {
            if is_short {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => spec.short == Some(c),
                    _ => false,
                }
            } else {
                spec.name == name
            }
        })
    }
}

impl fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("flags", &self.flags)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Name-keyed command table. Keys are case-sensitive and unique.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandInfo>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, rejecting duplicate names.
    pub fn register(&mut self, info: CommandInfo) -> Result<(), RegistryError> {
        if self.commands.contains_key(&info.name) {
            return Err(RegistryError::Duplicate(info.name));
        }
        self.commands.insert(info.name.clone(), info);
        Ok(())
    }

    /// Remove a command, returning it if present.
    pub fn unregister(&mut self, name: &str) -> Option<CommandInfo> {
        self.commands.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&CommandInfo> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All registered names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Commands not marked hidden, sorted by name.
    pub fn visible(&self) -> Vec<&CommandInfo> {
        let mut visible: Vec<&CommandInfo> =
            self.commands.values().filter(|info| !info.hidden).collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));
        visible
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
