//! Shared foundational types used across the tandem placer.
//!
//! Currently this is the common result type that every engine crate returns
//! for invariant violations.

#![warn(missing_docs)]

pub mod result;

pub use result::{InternalError, Stage, TandemResult};
