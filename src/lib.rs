//! `sandbox-fs` exposes a small set of filesystem tools where every
//! caller-supplied path must resolve inside an explicit allow-list of root
//! directories, even through symlinks, relative components, and leaves that
//! do not exist yet.
//!
//! The two load-bearing pieces are the sandbox resolver
//! ([`sandbox::AllowedRoots::resolve`]) and the fuzzy multi-edit patch
//! engine ([`ops::apply_edits`]); everything else is a thin, validated
//! pass-through over `std::fs`.

mod error;
pub mod ops;
mod path_utils;
pub mod sandbox;
pub mod tools;

pub use error::{Error, Result};

pub use ops::Context;
pub use sandbox::AllowedRoots;
