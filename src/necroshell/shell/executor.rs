//! Command execution: dispatch a [`ParsedCommand`] to its handler and hand
//! back the handler's [`CommandResult`] unchanged. Validation happened in the
//! parser; the executor adds nothing on top.

use crate::shell::parser::ParsedCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    Success,
    /// Malformed input that never reached a handler.
    InvalidCommand,
    /// The handler ran and reported failure.
    CommandFailed,
    /// Unexpected internal state.
    Internal,
}

impl ExecStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecStatus::Success => "success",
            ExecStatus::InvalidCommand => "invalid command",
            ExecStatus::CommandFailed => "command failed",
            ExecStatus::Internal => "internal error",
        }
    }
}

/// The uniform outcome of one command invocation. `should_exit` is the only
/// way a command can terminate the input loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: ExecStatus,
    /// Normal output text, shown on stdout.
    pub output: Option<String>,
    /// Failure description, shown on stderr.
    pub message: Option<String>,
    pub should_exit: bool,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            status: ExecStatus::Success,
            output: None,
            message: None,
            should_exit: false,
        }
    }

    pub fn success_with(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::success()
        }
    }

    pub fn error(status: ExecStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            output: None,
            message: Some(message.into()),
            should_exit: false,
        }
    }

    /// Handler-reported failure.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::error(ExecStatus::CommandFailed, message)
    }

    pub fn exit(output: Option<String>) -> Self {
        Self {
            status: ExecStatus::Success,
            output,
            message: None,
            should_exit: true,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecStatus::Success
    }
}

/// Invoke the resolved command's handler.
pub fn execute(cmd: &ParsedCommand) -> CommandResult {
    (cmd.info.handler)(cmd)
}
