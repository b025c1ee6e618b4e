//! # Necroshell Architecture
//!
//! Necroshell is the **UI-agnostic shell core** of a narrative terminal game: the
//! command pipeline, history, completion index, and save engine. The game-domain
//! managers (souls, minions, territory, and friends) are collaborators that plug
//! into the save engine through a serialize/deserialize contract; they are not
//! part of this crate.
//!
//! ## The layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binary (main.rs + args.rs)                                 │
//! │  - Prompt loop, result rendering, colors, exit codes        │
//! │  - The ONLY place that touches stdout/stderr                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell pipeline (shell/)                                    │
//! │  - tokenizer → parser → registry lookup → executor          │
//! │  - history ring buffer, trie-backed autocomplete            │
//! │  - InputHandler glues the pieces for one read/execute turn  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Save engine (save/)                                        │
//! │  - little-endian wire primitives, CRC-32 framing            │
//! │  - backup + temp-file + atomic-rename write protocol        │
//! │  - JSON sidecar for operator inspection                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key principle: no I/O assumptions in the core
//!
//! From the tokenizer inward, code takes regular arguments, returns `Result`
//! values, never writes to stdout/stderr, and never exits the process. The one
//! deliberate exception is [`shell::input::InputHandler`], which is the
//! designated seam between the pipeline and the terminal: it prints the prompt
//! and reads one line, nothing more.
//!
//! ## Concurrency model
//!
//! Single-threaded and cooperative. Shared shell state (registry, history,
//! session) is passed around as `Rc<RefCell<_>>`; command handlers are plain
//! `Fn(&ParsedCommand) -> CommandResult` values that capture the handles they
//! need. Nothing here is `Send` and nothing needs to be.
//!
//! ## Module overview
//!
//! - [`shell`]: tokenizer, parser, registry, executor, history, autocomplete,
//!   input loop
//! - [`trie`]: 128-way ASCII prefix tree backing completion
//! - [`save`]: framed binary save/load with CRC-32 and atomic replace
//! - [`session`]: the binary's concrete save-engine collaborator
//! - [`commands`]: built-in commands (help, history, save, load, quit, clear)
//! - [`config`]: JSON shell configuration
//! - [`error`]: umbrella error type

pub mod commands;
pub mod config;
pub mod error;
pub mod save;
pub mod session;
pub mod shell;
pub mod trie;
