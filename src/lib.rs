//! Dev-Console: an interactive developer toolbox written in Rust
//!
//! A read-eval-print loop over a fixed vocabulary of transform commands:
//! hashing, base64/url/unicode encoding and decoding, opening files and
//! URLs with the system default handler, and searching the web through a
//! registry of search engines.

pub mod codec;
pub mod console;
pub mod opener;
pub mod search;

pub use console::Console;
pub use opener::{Opener, SystemOpener};
pub use search::{EngineParam, EngineRegistry};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
