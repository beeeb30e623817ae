//! Page layout primitives.
//!
//! The extraction engine is an external collaborator; this module only
//! defines the shape of what it hands over.

pub mod fragment;

// Re-export main types
pub use fragment::{Fragment, PageFragments};
