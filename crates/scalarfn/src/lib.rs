//! Built-in scalar functions for SQL query engines
//!
//! This crate bundles the scalarfn workspace:
//! - [`types`]: data types and runtime values
//! - [`eval`]: function registry, call resolution and evaluation
//! - [`diagnostics`]: stable error codes
//!
//! # Example
//!
//! ```
//! use scalarfn::{FunctionEngine, ScalarValue};
//!
//! let engine = FunctionEngine::new();
//! let digest = engine
//!     .evaluate_literals("md5", vec![ScalarValue::string("ABC")])
//!     .unwrap();
//! assert_eq!(digest, ScalarValue::string("902fbdd2b1df0c4f70b4a5d23525e932"));
//! ```

// Re-export all public APIs from internal crates
pub use scalarfn_diagnostics as diagnostics;
pub use scalarfn_eval as eval;
pub use scalarfn_types as types;

// Convenience re-exports
pub use scalarfn_eval::{
    BoundFunction, FnResult, FunctionConfig, FunctionEngine, FunctionError, MapKeyDedupPolicy,
    Operand,
};
pub use scalarfn_types::{DataType, ScalarValue};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
