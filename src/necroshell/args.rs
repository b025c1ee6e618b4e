use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "necroshell")]
#[command(about = "Interactive command shell for the necromancer game", long_about = None)]
pub struct Cli {
    /// Save file path (default: ~/.necroshell_save.dat)
    #[arg(long)]
    pub save_path: Option<PathBuf>,

    /// History file path (default: ~/.necroshell_history)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Config directory (default: platform config dir)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Run a single command and exit instead of starting the prompt
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Player name for a fresh session
    #[arg(short, long)]
    pub player: Option<String>,
}
