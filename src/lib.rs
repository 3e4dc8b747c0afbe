//! Provenance-tracking number combination.
//!
//! Leaf values go into an [`ExpressionArena`]; `combine_with` and
//! `combine_self` derive new nodes through every enabled operator whose
//! checked arithmetic succeeds, and `render` rebuilds the expression text.

pub mod arena;
pub mod config;
pub mod domain;
pub mod errors;
pub mod render;
pub mod util;

pub use arena::{Candidate, ExpressionArena};
pub use config::Settings;
pub use domain::{Operation, ResultNode};
pub use generational_arena::Index;
pub use render::Expression;
