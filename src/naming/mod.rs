//! The positional naming convention shared with the server side form
//! processor.
//!
//! Every control of an item is named `<prefix>-<index>-<field>`, its
//! identity is `id_` plus that name, and each group submits a counter named
//! `<prefix>-TOTAL_FORMS`. Names are parsed into [`Name`] once, when a page
//! is loaded, and only rendered back to strings on the way out.

mod prefix;
mod types;

// Re-export all public symbols
pub use prefix::*;
pub use types::*;
