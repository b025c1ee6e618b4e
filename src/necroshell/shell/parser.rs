//! Table-driven command parser: turns a token sequence into a validated
//! [`ParsedCommand`] against the registry's flag schemas and argument bounds.

use crate::shell::registry::{CommandInfo, CommandRegistry, FlagType};
use crate::shell::tokenizer::{tokenize, Token, TokenizeError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error("empty command")]
    EmptyCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid flag: {0}")]
    InvalidFlag(String),

    #[error("missing value for flag --{0}")]
    MissingFlagValue(String),

    #[error("invalid value {value:?} for flag --{flag}")]
    InvalidFlagValue { flag: String, value: String },

    #[error("too few arguments: expected at least {expected}, got {got}")]
    TooFewArgs { expected: usize, got: usize },

    #[error("too many arguments: expected at most {expected}, got {got}")]
    TooManyArgs { expected: usize, got: usize },

    #[error("required flag missing: --{0}")]
    RequiredFlagMissing(String),
}

/// A parsed flag value. The variant always matches the declared
/// [`FlagType`] of its spec; the parser enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Str(String),
    Int(i32),
    Float(f64),
    Bool(bool),
}

impl FlagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            FlagValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FlagValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// The validated result of a parse: resolved command, typed flags, and
/// positional arguments. Owned by the executor for one invocation.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub name: String,
    pub info: CommandInfo,
    flags: HashMap<String, FlagValue>,
    args: Vec<String>,
    pub raw_input: String,
}

impl ParsedCommand {
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

fn parse_flag_value(spec_name: &str, value_type: FlagType, raw: &str) -> Result<FlagValue, ParseError> {
    let invalid = || ParseError::InvalidFlagValue {
        flag: spec_name.to_string(),
        value: raw.to_string(),
    };
    match value_type {
        FlagType::Str => Ok(FlagValue::Str(raw.to_string())),
        FlagType::Int => raw.parse::<i32>().map(FlagValue::Int).map_err(|_| invalid()),
        FlagType::Float => raw.parse::<f64>().map(FlagValue::Float).map_err(|_| invalid()),
        FlagType::Bool => match raw {
            "true" | "1" => Ok(FlagValue::Bool(true)),
            "false" | "0" => Ok(FlagValue::Bool(false)),
            _ => Err(invalid()),
        },
    }
}

/// True for tokens that begin flag parsing. Quoted tokens never count, so a
/// positional argument that happens to start with `-` can always be passed
/// by quoting it.
fn is_flag_token(token: &Token) -> bool {
    !token.quoted && token.text.len() > 1 && token.text.starts_with('-')
}

/// Parse a token sequence against the registry.
pub fn parse_tokens(
    tokens: &[Token],
    registry: &CommandRegistry,
) -> Result<ParsedCommand, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyCommand);
    }

    let name = tokens[0].text.clone();
    let info = registry
        .get(&name)
        .ok_or_else(|| ParseError::UnknownCommand(name.clone()))?
        .clone();

    let mut flags: HashMap<String, FlagValue> = HashMap::new();
    let mut args: Vec<String> = Vec::new();
    let mut flags_done = false;

    let mut i = 1;
    while i < tokens.len() {
        let token = &tokens[i];

        if flags_done || !is_flag_token(token) {
            args.push(token.text.clone());
            i += 1;
            continue;
        }

        if token.text == "--" {
            flags_done = true;
            i += 1;
            continue;
        }

        let (is_short, body) = match token.text.strip_prefix("--") {
            Some(rest) => (false, rest),
            None => (true, &token.text[1..]),
        };

        // `--name=value` carries the value inline.
        let (flag_name, inline_value) = match body.split_once('=') {
            Some((n, v)) => (n, Some(v)),
            None => (body, None),
        };

        if flag_name.is_empty() {
            return Err(ParseError::InvalidFlag(token.text.clone()));
        }

        let spec = info
            .find_flag(flag_name, is_short)
            .ok_or_else(|| ParseError::InvalidFlag(token.text.clone()))?;

        let value = if spec.value_type == FlagType::Bool {
            // Presence implies true; an explicit value may only come inline.
            match inline_value {
                Some(raw) => parse_flag_value(&spec.name, FlagType::Bool, raw)?,
                None => FlagValue::Bool(true),
            }
        } else {
            let raw = match inline_value {
                Some(raw) => raw.to_string(),
                None => {
                    i += 1;
                    tokens
                        .get(i)
                        .map(|t| t.text.clone())
                        .ok_or_else(|| ParseError::MissingFlagValue(spec.name.clone()))?
                }
            };
            parse_flag_value(&spec.name, spec.value_type, &raw)?
        };

        flags.insert(spec.name.clone(), value);
        i += 1;
    }

    for spec in &info.flags {
        if spec.required && !flags.contains_key(&spec.name) {
            return Err(ParseError::RequiredFlagMissing(spec.name.clone()));
        }
    }

    if args.len() < info.min_args {
        return Err(ParseError::TooFewArgs {
            expected: info.min_args,
            got: args.len(),
        });
    }
    if info.max_args > 0 && args.len() > info.max_args {
        return Err(ParseError::TooManyArgs {
            expected: info.max_args,
            got: args.len(),
        });
    }

    Ok(ParsedCommand {
        name,
        info,
        flags,
        args,
        raw_input: String::new(),
    })
}

/// Tokenize and parse one input line. An all-whitespace line parses as
/// [`ParseError::EmptyCommand`].
pub fn parse_line(input: &str, registry: &CommandRegistry) -> Result<ParsedCommand, ParseError> {
    let tokens = tokenize(input)?;
    let mut parsed = parse_tokens(&tokens, registry)?;
    parsed.raw_input = input.to_string();
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::executor::CommandResult;
    use crate::shell::registry::FlagSpec;
    use std::rc::Rc;

    fn registry() -> CommandRegistry {
        let noop: crate::shell::registry::CommandHandler = Rc::new(|_| CommandResult::success());
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandInfo::new("log", "Write to the log", Rc::clone(&noop))
                    .with_flags(vec![
                        FlagSpec::new("file", FlagType::Str).with_short('f'),
                        FlagSpec::new("level", FlagType::Int),
                        FlagSpec::new("rate", FlagType::Float),
                        FlagSpec::new("verbose", FlagType::Bool).with_short('v'),
                    ])
                    .with_arg_bounds(0, 1),
            )
            .unwrap();
        registry
            .register(
                CommandInfo::new("help", "List commands", Rc::clone(&noop)).with_arg_bounds(0, 1),
            )
            .unwrap();
        registry
            .register(
                CommandInfo::new("bind", "Bind a soul", Rc::clone(&noop))
                    .with_flags(vec![FlagSpec::new("target", FlagType::Str).required()])
                    .with_arg_bounds(1, 0),
            )
            .unwrap();
        registry
    }

    #[test]
    fn empty_token_list_is_empty_command() {
        assert_eq!(
            parse_tokens(&[], &registry()).unwrap_err(),
            ParseError::EmptyCommand
        );
    }

    #[test]
    fn unknown_command() {
        let err = parse_line("summon", &registry()).unwrap_err();
        assert_eq!(err, ParseError::UnknownCommand("summon".to_string()));
    }

    #[test]
    fn equals_and_separate_value_forms_agree() {
        let registry = registry();
        let a = parse_line("log info --file=/tmp/out", &registry).unwrap();
        let b = parse_line("log --file /tmp/out info", &registry).unwrap();

        for cmd in [&a, &b] {
            assert_eq!(cmd.name, "log");
            assert_eq!(cmd.flag("file").unwrap().as_str(), Some("/tmp/out"));
            assert_eq!(cmd.args(), ["info"]);
        }
    }

    #[test]
    fn short_flag_with_value() {
        let cmd = parse_line("log -f out.txt", &registry()).unwrap();
        assert_eq!(cmd.flag("file").unwrap().as_str(), Some("out.txt"));
    }

    #[test]
    fn typed_flag_values() {
        let cmd = parse_line("log --level 3 --rate 0.5", &registry()).unwrap();
        assert_eq!(cmd.flag("level").unwrap().as_int(), Some(3));
        assert_eq!(cmd.flag("rate").unwrap().as_float(), Some(0.5));
    }

    #[test]
    fn negative_int_value() {
        let cmd = parse_line("log --level -2", &registry()).unwrap();
        assert_eq!(cmd.flag("level").unwrap().as_int(), Some(-2));
    }

    #[test]
    fn bool_flag_presence_is_true() {
        let cmd = parse_line("log -v", &registry()).unwrap();
        assert_eq!(cmd.flag("verbose").unwrap().as_bool(), Some(true));
        assert!(!parse_line("log", &registry()).unwrap().has_flag("verbose"));
    }

    #[test]
    fn bool_flag_inline_literals() {
        let registry = registry();
        for (raw, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
            let cmd = parse_line(&format!("log --verbose={raw}"), &registry).unwrap();
            assert_eq!(cmd.flag("verbose").unwrap().as_bool(), Some(expected));
        }
        let err = parse_line("log --verbose=maybe", &registry).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFlagValue { .. }));
    }

    #[test]
    fn bool_flag_does_not_consume_next_token() {
        let cmd = parse_line("log -v info", &registry()).unwrap();
        assert_eq!(cmd.flag("verbose").unwrap().as_bool(), Some(true));
        assert_eq!(cmd.args(), ["info"]);
    }

    #[test]
    fn missing_flag_value() {
        let err = parse_line("log --file", &registry()).unwrap_err();
        assert_eq!(err, ParseError::MissingFlagValue("file".to_string()));
    }

    #[test]
    fn invalid_typed_value() {
        let err = parse_line("log --level three", &registry()).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFlagValue {
                flag: "level".to_string(),
                value: "three".to_string(),
            }
        );
    }

    #[test]
    fn unknown_flag() {
        let err = parse_line("log --nope x", &registry()).unwrap_err();
        assert_eq!(err, ParseError::InvalidFlag("--nope".to_string()));
    }

    #[test]
    fn double_dash_ends_flag_parsing() {
        let cmd = parse_line("log -- --file", &registry()).unwrap();
        assert!(!cmd.has_flag("file"));
        assert_eq!(cmd.args(), ["--file"]);
    }

    #[test]
    fn quoted_token_is_never_a_flag() {
        let cmd = parse_line("log \"--file\"", &registry()).unwrap();
        assert!(!cmd.has_flag("file"));
        assert_eq!(cmd.args(), ["--file"]);
    }

    #[test]
    fn lone_dash_is_positional() {
        let cmd = parse_line("log -", &registry()).unwrap();
        assert_eq!(cmd.args(), ["-"]);
    }

    #[test]
    fn arg_count_bounds() {
        let registry = registry();
        assert!(parse_line("help save", &registry).is_ok());
        let err = parse_line("help save load", &registry).unwrap_err();
        assert_eq!(err, ParseError::TooManyArgs { expected: 1, got: 2 });

        let err = parse_line("bind --target wisp", &registry).unwrap_err();
        assert_eq!(err, ParseError::TooFewArgs { expected: 1, got: 0 });
    }

    #[test]
    fn unbounded_args_accept_one_more() {
        // With max_args == 0 a successful parse stays successful when an
        // extra positional is appended.
        let registry = registry();
        let base = parse_line("bind --target wisp a b c", &registry).unwrap();
        let more = parse_line("bind --target wisp a b c d", &registry).unwrap();
        assert_eq!(more.arg_count(), base.arg_count() + 1);
    }

    #[test]
    fn required_flag_enforced() {
        let err = parse_line("bind soul", &registry()).unwrap_err();
        assert_eq!(err, ParseError::RequiredFlagMissing("target".to_string()));
    }

    #[test]
    fn tokenize_errors_propagate() {
        let err = parse_line("log \"oops", &registry()).unwrap_err();
        assert_eq!(err, ParseError::Tokenize(TokenizeError::UnclosedQuote));
    }

    #[test]
    fn raw_input_is_preserved() {
        let cmd = parse_line("log  info", &registry()).unwrap();
        assert_eq!(cmd.raw_input, "log  info");
    }
}
