//! Shared types for the spritestage crates.
//!
//! # Invariants
//! - Every construction or command failure in the core is an `InvalidArgument`.
//! - Types here carry no behaviour beyond validation helpers.

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{NodeId, Transform};
