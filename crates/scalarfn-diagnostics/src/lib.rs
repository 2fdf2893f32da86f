//! scalarfn diagnostics
//!
//! Stable error codes shared by the resolver and the function libraries.
//! Every error raised by `scalarfn-eval` maps to exactly one code, and every
//! code belongs to one [`ErrorClass`].

mod error_code;

pub use error_code::*;
