//! Semantic checks over a built document.
//!
//! Each analysis is an independent traversal against the symbol table and
//! reports every finding of its pass; none of them stops early.

mod missing_reference;
mod redeclaration;

pub use missing_reference::find_missing_participants;
pub use redeclaration::find_redeclarations;
