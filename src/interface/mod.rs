//! # Interface Layer
//!
//! Command handlers, one behavior per registered name.

pub mod commands;
