//! `help` — list visible commands, or show one command in detail.

use crate::commands::BuiltinContext;
use crate::shell::executor::CommandResult;
use crate::shell::registry::{CommandInfo, CommandRegistry};
use std::fmt::Write;
use std::rc::Rc;

pub fn info(ctx: &BuiltinContext) -> CommandInfo {
    let registry = Rc::clone(&ctx.registry);
    CommandInfo::new(
        "help",
        "Show available commands, or details for one command",
        Rc::new(move |cmd| match cmd.arg(0) {
            Some(name) => describe(&registry.borrow(), name),
            None => overview(&registry.borrow()),
        }),
    )
    .with_usage("help [command]")
    .with_arg_bounds(0, 1)
}

fn overview(registry: &CommandRegistry) -> CommandResult {
    let mut out = String::from("Available commands:\n");
    let visible = registry.visible();
    let width = visible.iter().map(|info| info.name.len()).max().unwrap_or(0);
    for info in visible {
        let _ = writeln!(out, "  {:width$}  {}", info.name, info.description);
    }
    out.push_str("\nUse 'help <command>' for details.");
    CommandResult::success_with(out)
}

fn describe(registry: &CommandRegistry, name: &str) -> CommandResult {
    let Some(info) = registry.get(name) else {
        return CommandResult::failure(format!("no such command: {name}"));
    };

    let mut out = format!("{} - {}", info.name, info.description);
    if !info.usage.is_empty() {
        let _ = write!(out, "\n\nUsage: {}", info.usage);
    }
    if !info.help_text.is_empty() {
        let _ = write!(out, "\n\n{}", info.help_text);
    }
    if !info.flags.is_empty() {
        out.push_str("\n\nFlags:");
        for spec in &info.flags {
            let short = spec
                .short
                .map(|c| format!("-{c}, "))
                .unwrap_or_default();
            let req = if spec.required { " (required)" } else { "" };
            let _ = write!(out, "\n  {short}--{}  {}{req}", spec.name, spec.description);
        }
    }
    CommandResult::success_with(out)
}
