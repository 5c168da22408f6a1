//! The in-memory form: groups, their items, and the controls carrying
//! naming attributes.

mod data;
mod page;
mod types;

// Re-export all public symbols
pub use page::*;
pub use types::*;
