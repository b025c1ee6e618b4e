//! `load` — restore the session from a save file.

use crate::commands::BuiltinContext;
use crate::save;
use crate::session::Session;
use crate::shell::executor::CommandResult;
use crate::shell::registry::CommandInfo;
use std::path::PathBuf;
use std::rc::Rc;

pub fn info(ctx: &BuiltinContext) -> CommandInfo {
    let session = Rc::clone(&ctx.session);
    let default_path = ctx.save_path.clone();
    CommandInfo::new(
        "load",
        "Restore the game state from disk",
        Rc::new(move |cmd| {
            let path = cmd
                .arg(0)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_path.clone());

            if !save::save_file_exists(&path) {
                return CommandResult::failure(format!("no save file at {}", path.display()));
            }

            match save::load_from_path::<Session>(&path) {
                Ok(loaded) => {
                    let summary = format!(
                        "Loaded {} ({} commands across {} sessions).",
                        loaded.player_name, loaded.commands_executed, loaded.sessions_started
                    );
                    *session.borrow_mut() = loaded;
                    CommandResult::success_with(summary)
                }
                // The current session is untouched on any failure.
                Err(err) => CommandResult::failure(format!("load failed: {err}")),
            }
        }),
    )
    .with_usage("load [path]")
    .with_arg_bounds(0, 1)
}

#[cfg(test)]
mod tests {
    use crate::commands::{run_line, test_context};
    use crate::session::Session;
    use std::fs;

    #[test]
    fn round_trips_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().join("save.dat"));
        ctx.session.borrow_mut().player_name = "Moth".to_string();
        ctx.session.borrow_mut().commands_executed = 42;

        assert!(run_line(&ctx, "save").is_success());

        *ctx.session.borrow_mut() = Session::default();
        let result = run_line(&ctx, "load");
        assert!(result.is_success(), "{:?}", result.message);
        assert_eq!(ctx.session.borrow().player_name, "Moth");
        assert_eq!(ctx.session.borrow().commands_executed, 42);
    }

    #[test]
    fn missing_file_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().join("save.dat"));

        let result = run_line(&ctx, "load");
        assert!(!result.is_success());
        assert!(result.message.unwrap().contains("no save file"));
    }

    #[test]
    fn corrupted_file_leaves_session_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.dat");
        let ctx = test_context(path.clone());
        ctx.session.borrow_mut().player_name = "Moth".to_string();

        assert!(run_line(&ctx, "save").is_success());
        let mut raw = fs::read(&path).unwrap();
        let end = raw.len();
        raw[end - 1] ^= 0xFF;
        fs::write(&path, &raw).unwrap();

        ctx.session.borrow_mut().player_name = "Untouched".to_string();
        let result = run_line(&ctx, "load");
        assert!(!result.is_success());
        assert_eq!(ctx.session.borrow().player_name, "Untouched");
    }
}
