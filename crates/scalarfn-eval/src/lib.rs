//! scalarfn Function Library
//!
//! This crate resolves and evaluates the built-in scalar functions of a SQL
//! query engine over [`ScalarValue`](scalarfn_types::ScalarValue)s:
//!
//! - **Collection Functions**: size, element_at, slice, flatten, sort_array,
//!   set operations, array_join and friends
//! - **Map Functions**: map_from_arrays, map_from_entries, map_keys, ...
//! - **Masking Functions**: mask and the positional mask_* variants
//! - **Hash Functions**: md5, sha1, sha2, crc32 and 32-bit Murmur3 `hash`
//! - **Variadic Helpers**: coalesce, least, greatest, struct, named_struct
//! - **Math**: pmod
//!
//! # Example
//!
//! ```
//! use scalarfn_eval::{FunctionEngine, Operand};
//! use scalarfn_types::{DataType, ScalarValue};
//!
//! let engine = FunctionEngine::new();
//! let bound = engine
//!     .resolve(
//!         "array_contains",
//!         &[
//!             Operand::column(DataType::array(DataType::Long, false), false),
//!             Operand::literal(ScalarValue::Long(2)),
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(bound.return_type(), &DataType::Boolean);
//!
//! let row = [
//!     ScalarValue::array(DataType::Long, vec![ScalarValue::Long(1), ScalarValue::Long(2)]),
//!     ScalarValue::Long(2),
//! ];
//! assert_eq!(bound.evaluate(&row).unwrap(), ScalarValue::Boolean(true));
//! ```
//!
//! # Architecture
//!
//! - `FunctionRegistry`: catalogue of definitions, parameters and aliases
//! - `FunctionEngine`: looks up a name and resolves the call against its
//!   [`Operand`]s, reporting type errors before any row is seen
//! - `BoundFunction`: the resolved call; evaluates one row at a time
//! - `functions`: the value-level implementations, usable on their own
//!
//! # Null Semantics
//!
//! Unless a function documents otherwise, a null argument yields a null
//! result. Comparisons inside arrays and maps treat two nulls as equal, and
//! ordering puts NaN above every other double.

pub mod bound;
pub mod config;
pub mod engine;
pub mod error;
pub mod functions;
pub mod operand;
pub mod ordering;
pub mod registry;
mod resolver;

// Re-export main types
pub use bound::{BoundFunction, Kernel};
pub use config::{FunctionConfig, MapKeyDedupPolicy, MAX_ARRAY_LENGTH};
pub use engine::FunctionEngine;
pub use error::{FnResult, FunctionError};
pub use operand::Operand;
pub use ordering::{compare_values, values_equal, NullOrdering};
pub use registry::{Arity, FunctionDefinition, FunctionParameter, FunctionRegistry, ScalarFunction};
