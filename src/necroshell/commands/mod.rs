//! Built-in shell commands. Each command file exposes an `info(...)`
//! constructor returning its [`CommandInfo`]; handlers capture shared state
//! through the `Rc<RefCell<_>>` handles in [`BuiltinContext`].

pub mod clear;
pub mod help;
pub mod history;
pub mod load;
pub mod quit;
pub mod save;

use crate::shell::history::History;
use crate::shell::registry::{CommandRegistry, RegistryError};
use crate::session::Session;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Shared state the built-ins close over.
#[derive(Clone)]
pub struct BuiltinContext {
    pub registry: Rc<RefCell<CommandRegistry>>,
    pub history: Rc<RefCell<History>>,
    pub session: Rc<RefCell<Session>>,
    pub save_path: PathBuf,
}

/// Register every built-in into the context's registry.
pub fn register_builtins(ctx: &BuiltinContext) -> Result<(), RegistryError> {
    let mut registry = ctx.registry.borrow_mut();
    registry.register(help::info(ctx))?;
    registry.register(history::info(ctx))?;
    registry.register(save::info(ctx))?;
    registry.register(load::info(ctx))?;
    registry.register(clear::info())?;
    registry.register(quit::info())?;
    // "exit" works too, but stays out of listings.
    registry.register(quit::alias())?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_context(save_path: PathBuf) -> BuiltinContext {
    let ctx = BuiltinContext {
        registry: Rc::new(RefCell::new(CommandRegistry::new())),
        history: Rc::new(RefCell::new(History::new(16))),
        session: Rc::new(RefCell::new(Session::new("tester"))),
        save_path,
    };
    register_builtins(&ctx).unwrap();
    ctx
}

#[cfg(test)]
pub(crate) fn run_line(ctx: &BuiltinContext, line: &str) -> crate::shell::executor::CommandResult {
    let parsed = {
        let registry = ctx.registry.borrow();
        crate::shell::parser::parse_line(line, &registry).unwrap()
    };
    crate::shell::executor::execute(&parsed)
}
