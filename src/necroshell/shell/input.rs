//! The interactive read-eval loop. `InputHandler` owns the wiring between
//! the line source, history, autocomplete index, and the parse/execute
//! pipeline; the binary just spins [`InputHandler::read_and_execute`] until
//! a command asks to exit.

use crate::shell::autocomplete::Autocomplete;
use crate::shell::executor::{self, CommandResult, ExecStatus};
use crate::shell::history::History;
use crate::shell::parser::parse_line;
use crate::shell::registry::{CommandInfo, CommandRegistry, RegistryError};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

pub struct InputHandler {
    registry: Rc<RefCell<CommandRegistry>>,
    history: Rc<RefCell<History>>,
    autocomplete: Autocomplete,
    history_path: PathBuf,
    lines_submitted: u64,
}

impl InputHandler {
    /// Wire up the loop state. Previously saved history is loaded from
    /// `history_path`; a missing file just means a fresh start.
    pub fn new(
        registry: Rc<RefCell<CommandRegistry>>,
        history: Rc<RefCell<History>>,
        history_path: PathBuf,
    ) -> io::Result<Self> {
        history.borrow_mut().load(&history_path)?;
        let autocomplete = Autocomplete::new(&registry.borrow());
        Ok(Self {
            registry,
            history,
            autocomplete,
            history_path,
            lines_submitted: 0,
        })
    }

    /// Register a command and re-index completion.
    pub fn register_command(&mut self, info: CommandInfo) -> Result<(), RegistryError> {
        self.registry.borrow_mut().register(info)?;
        self.autocomplete.rebuild(&self.registry.borrow());
        Ok(())
    }

    /// Unregister a command and re-index completion.
    pub fn unregister_command(&mut self, name: &str) -> Option<CommandInfo> {
        let removed = self.registry.borrow_mut().unregister(name);
        if removed.is_some() {
            self.autocomplete.rebuild(&self.registry.borrow());
        }
        removed
    }

    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    pub fn completions(&self, input: &str) -> Vec<String> {
        self.autocomplete.completions(&self.registry.borrow(), input)
    }

    /// One loop iteration: print the prompt, read a line, record it, and run
    /// it. EOF yields an exit result; a blank line yields a quiet success and
    /// is not recorded.
    pub fn read_and_execute(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
        prompt: &str,
    ) -> io::Result<CommandResult> {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like quit.
            return Ok(CommandResult::exit(None));
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(CommandResult::success());
        }

        Ok(self.submit_line(line))
    }

    /// Record and execute one non-empty line, expanding `!n` recall first.
    pub fn submit_line(&mut self, line: &str) -> CommandResult {
        let line = match self.expand_recall(line) {
            Ok(expanded) => expanded,
            Err(result) => return result,
        };

        self.history.borrow_mut().add(&line);
        self.lines_submitted += 1;
        self.execute_line(&line)
    }

    /// Count of non-empty lines submitted this run.
    pub fn lines_submitted(&self) -> u64 {
        self.lines_submitted
    }

    /// Parse and execute a line without touching history.
    pub fn execute_line(&mut self, line: &str) -> CommandResult {
        let parsed = {
            let registry = self.registry.borrow();
            match parse_line(line, &registry) {
                Ok(parsed) => parsed,
                Err(err) => {
                    return CommandResult::error(ExecStatus::InvalidCommand, err.to_string())
                }
            }
        };
        // The registry borrow is released; handlers may mutate it.
        executor::execute(&parsed)
    }

    /// `!n` recalls the line `n` steps back (0 = most recent). Anything else
    /// passes through unchanged.
    fn expand_recall(&self, line: &str) -> Result<String, CommandResult> {
        let Some(rest) = line.strip_prefix('!') else {
            return Ok(line.to_string());
        };
        let Ok(index) = rest.parse::<usize>() else {
            return Err(CommandResult::error(
                ExecStatus::InvalidCommand,
                format!("bad history reference: !{rest}"),
            ));
        };
        match self.history.borrow().get(index) {
            Some(recalled) => Ok(recalled.to_string()),
            None => Err(CommandResult::error(
                ExecStatus::InvalidCommand,
                format!("no history entry {index}"),
            )),
        }
    }

    /// Persist history now instead of waiting for drop.
    pub fn save_history(&self) -> io::Result<()> {
        self.history.borrow().save(&self.history_path)
    }
}

impl Drop for InputHandler {
    fn drop(&mut self) {
        // Teardown persistence; a failed write must not panic here.
        let _ = self.save_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn handler_with(commands: &[&str], dir: &std::path::Path) -> InputHandler {
        let mut registry = CommandRegistry::new();
        for name in commands {
            registry
                .register(CommandInfo::new(
                    *name,
                    "",
                    Rc::new(|cmd: &crate::shell::parser::ParsedCommand| {
                        CommandResult::success_with(format!("ran {}", cmd.name))
                    }),
                ))
                .unwrap();
        }
        InputHandler::new(
            Rc::new(RefCell::new(registry)),
            Rc::new(RefCell::new(History::new(16))),
            dir.join("history"),
        )
        .unwrap()
    }

    #[test]
    fn prompt_read_and_execute() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&["scan"], dir.path());

        let mut input = Cursor::new(b"scan\n".to_vec());
        let mut output = Vec::new();
        let result = handler
            .read_and_execute(&mut input, &mut output, "necro> ")
            .unwrap();

        assert_eq!(output, b"necro> ");
        assert!(result.is_success());
        assert_eq!(result.output.as_deref(), Some("ran scan"));
        assert_eq!(handler.history.borrow().get(0), Some("scan"));
    }

    #[test]
    fn eof_exits_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&[], dir.path());

        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = handler
            .read_and_execute(&mut input, &mut output, "> ")
            .unwrap();
        assert!(result.should_exit);
    }

    #[test]
    fn blank_lines_are_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&[], dir.path());

        let mut input = Cursor::new(b"   \n".to_vec());
        let mut output = Vec::new();
        let result = handler
            .read_and_execute(&mut input, &mut output, "> ")
            .unwrap();
        assert!(result.is_success());
        assert!(handler.history.borrow().is_empty());
    }

    #[test]
    fn parse_errors_become_invalid_command_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&[], dir.path());

        let result = handler.submit_line("summon");
        assert_eq!(result.status, ExecStatus::InvalidCommand);
        assert!(result.message.is_some());
        // Even failed lines are kept, so they can be recalled and fixed.
        assert_eq!(handler.history.borrow().get(0), Some("summon"));
    }

    #[test]
    fn recall_re_executes_a_past_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&["scan", "status"], dir.path());

        handler.submit_line("scan");
        handler.submit_line("status");

        let result = handler.submit_line("!1");
        assert_eq!(result.output.as_deref(), Some("ran scan"));
        // The recalled text, not the bang form, lands in history.
        assert_eq!(handler.history.borrow().get(0), Some("scan"));
    }

    #[test]
    fn recall_out_of_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&[], dir.path());
        let result = handler.submit_line("!7");
        assert_eq!(result.status, ExecStatus::InvalidCommand);

        let result = handler.submit_line("!abc");
        assert_eq!(result.status, ExecStatus::InvalidCommand);
    }

    #[test]
    fn registering_updates_completions() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler_with(&["scan"], dir.path());

        handler
            .register_command(CommandInfo::new(
                "scatter",
                "",
                Rc::new(|_| CommandResult::success()),
            ))
            .unwrap();
        assert_eq!(handler.completions("sca").len(), 2);

        handler.unregister_command("scatter");
        assert_eq!(handler.completions("sca"), vec!["scan".to_string()]);
    }

    #[test]
    fn history_survives_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        {
            let mut handler = handler_with(&["scan"], dir.path());
            handler.submit_line("scan");
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "scan\n");
    }
}
