//! `clear` — wipe the terminal.

use crate::shell::executor::CommandResult;
use crate::shell::registry::CommandInfo;
use std::rc::Rc;

/// ANSI erase-display plus cursor-home.
const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[1;1H";

pub fn info() -> CommandInfo {
    CommandInfo::new(
        "clear",
        "Clear the screen",
        Rc::new(|_| CommandResult::success_with(CLEAR_SEQUENCE)),
    )
}
