//! CLI functionality for the sfn tool
//!
//! This module contains:
//! - Argument parsing from JSON literals
//! - Function evaluation
//! - Function listing
//! - Output formatting and logging

pub mod args;
pub mod eval;
pub mod list;
pub mod output;
