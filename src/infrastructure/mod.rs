//! # Infrastructure Layer
//!
//! Concrete bindings to the outside world: the Matrix transport and the
//! local process runner.

pub mod matrix;
pub mod process;
