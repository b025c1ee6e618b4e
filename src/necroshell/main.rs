use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use necroshell::commands::{register_builtins, BuiltinContext};
use necroshell::config::ShellConfig;
use necroshell::error::Result;
use necroshell::save;
use necroshell::session::Session;
use necroshell::shell::executor::CommandResult;
use necroshell::shell::history::{self, History};
use necroshell::shell::input::InputHandler;
use necroshell::shell::registry::CommandRegistry;
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

mod args;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "necroshell", "necroshell")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let config = ShellConfig::load(&config_dir).unwrap_or_default();

    let save_path = cli
        .save_path
        .or(config.save_path.clone())
        .unwrap_or_else(save::default_save_path);
    let history_path = cli
        .history_file
        .or(config.history_path.clone())
        .unwrap_or_else(history::default_history_path);

    let registry = Rc::new(RefCell::new(CommandRegistry::new()));
    let history = Rc::new(RefCell::new(History::new(config.history_capacity)));
    let session = Rc::new(RefCell::new(Session::new(
        cli.player.as_deref().unwrap_or("wanderer"),
    )));

    register_builtins(&BuiltinContext {
        registry: Rc::clone(&registry),
        history: Rc::clone(&history),
        session: Rc::clone(&session),
        save_path,
    })?;

    let mut handler = InputHandler::new(registry, history, history_path)?;

    // Single-shot mode: run one line, no prompt, no banner.
    if let Some(line) = &cli.command {
        let result = handler.submit_line(line);
        render(&result);
        handler.save_history()?;
        if !result.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("{}", "Necroshell 1.0.0".bold());
    println!("{}", "Type 'help' for commands, 'quit' to leave.".dimmed());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    loop {
        let submitted_before = handler.lines_submitted();
        let result = handler.read_and_execute(&mut input, &mut output, &config.prompt)?;
        render(&result);

        if handler.lines_submitted() != submitted_before {
            session.borrow_mut().commands_executed += 1;
        }
        if result.should_exit {
            break;
        }
    }
    Ok(())
}

fn render(result: &CommandResult) {
    if let Some(output) = &result.output {
        println!("{output}");
    }
    if let Some(message) = &result.message {
        eprintln!("{}", message.red());
    }
}
