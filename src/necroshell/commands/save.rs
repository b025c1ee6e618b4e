//! `save` — persist the session through the save engine.

use crate::commands::BuiltinContext;
use crate::save;
use crate::shell::executor::CommandResult;
use crate::shell::registry::CommandInfo;
use std::path::PathBuf;
use std::rc::Rc;

pub fn info(ctx: &BuiltinContext) -> CommandInfo {
    let session = Rc::clone(&ctx.session);
    let default_path = ctx.save_path.clone();
    CommandInfo::new(
        "save",
        "Write the game state to disk",
        Rc::new(move |cmd| {
            let path = cmd
                .arg(0)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_path.clone());

            if let Err(err) = save::save_to_path(&*session.borrow(), &path) {
                return CommandResult::failure(format!("save failed: {err}"));
            }

            let size = save::save_file_size(&path).unwrap_or(0);
            CommandResult::success_with(format!(
                "Saved to {} ({size} bytes).",
                path.display()
            ))
        }),
    )
    .with_usage("save [path]")
    .with_help_text("The previous save, if any, is kept as <path>.bak.")
    .with_arg_bounds(0, 1)
}
