//! The index management engine: counters, prefix resolution, renumbering,
//! templates, and the commands tying them together.

mod counter;
mod manager;
mod resolver;
mod rewriter;
mod template;

// Re-export all public symbols
pub use counter::*;
pub use manager::*;
pub use resolver::*;
pub use rewriter::*;
pub use template::*;
