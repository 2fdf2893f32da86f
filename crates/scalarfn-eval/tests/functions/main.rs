//! Function integration tests
//!
//! These tests go through the public engine: every call is resolved against
//! its argument types first, then evaluated. They cover:
//! - Results for typical inputs
//! - Null propagation and null placement
//! - Resolution errors versus per-row evaluation errors
//! - Configuration switches (ANSI mode, legacy size, map key dedup)

mod collection;
mod common;
mod hash;
mod map;
mod mask;
mod properties;
