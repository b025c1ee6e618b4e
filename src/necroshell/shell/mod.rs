//! The interactive shell pipeline: raw line in, [`CommandResult`] out.
//!
//! A line flows tokenizer -> parser -> executor. The registry resolves names
//! and flag schemas, history records accepted lines, and autocomplete indexes
//! registered names in a trie. [`input::InputHandler`] ties the stages
//! together for the interactive loop.
//!
//! [`CommandResult`]: executor::CommandResult

pub mod autocomplete;
pub mod executor;
pub mod history;
pub mod input;
pub mod parser;
pub mod registry;
pub mod tokenizer;
