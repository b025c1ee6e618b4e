//! `quit` — leave the shell. `exit` is a hidden alias.

use crate::shell::executor::CommandResult;
use crate::shell::registry::CommandInfo;
use std::rc::Rc;

pub fn info() -> CommandInfo {
    CommandInfo::new(
        "quit",
        "Leave the shell",
        Rc::new(|_| CommandResult::exit(Some("The veil closes behind you.".to_string()))),
    )
}

pub fn alias() -> CommandInfo {
    CommandInfo::new(
        "exit",
        "Leave the shell",
        Rc::new(|_| CommandResult::exit(Some("The veil closes behind you.".to_string()))),
    )
    .hidden()
}

#[cfg(test)]
mod tests {
    use crate::commands::{run_line, test_context};

    #[test]
    fn quit_and_exit_both_terminate() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().join("save.dat"));

        assert!(run_line(&ctx, "quit").should_exit);
        assert!(run_line(&ctx, "exit").should_exit);
    }
}
