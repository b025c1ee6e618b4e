//! `history` — inspect, search, or clear the command history.

use crate::commands::BuiltinContext;
use crate::shell::executor::CommandResult;
use crate::shell::registry::{CommandInfo, FlagSpec, FlagType};
use std::fmt::Write;
use std::rc::Rc;

pub fn info(ctx: &BuiltinContext) -> CommandInfo {
    let history = Rc::clone(&ctx.history);
    CommandInfo::new(
        "history",
        "Show recent commands (0 = most recent)",
        Rc::new(move |cmd| {
            if cmd.flag("clear").and_then(|v| v.as_bool()) == Some(true) {
                history.borrow_mut().clear();
                return CommandResult::success_with("History cleared.");
            }

            if let Some(pattern) = cmd.flag("search").and_then(|v| v.as_str()) {
                let matches = history.borrow().search(pattern);
                if matches.is_empty() {
                    return CommandResult::success_with(format!("No matches for '{pattern}'."));
                }
                return CommandResult::success_with(numbered(matches.iter().map(String::as_str)));
            }

            let history = history.borrow();
            if history.is_empty() {
                return CommandResult::success_with("History is empty.");
            }
            CommandResult::success_with(numbered(history.iter_recent()))
        }),
    )
    .with_usage("history [--search <pattern>] [--clear]")
    .with_help_text("Recall an entry with !<number>.")
    .with_flags(vec![
        FlagSpec::new("search", FlagType::Str)
            .with_short('s')
            .with_description("Show only entries containing the pattern"),
        FlagSpec::new("clear", FlagType::Bool).with_description("Forget all history entries"),
    ])
}

fn numbered<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (i, line) in lines.enumerate() {
        let _ = writeln!(out, "{i:4}  {line}");
    }
    out.pop();
    out
}
