//! scalarfn value and type model
//!
//! This crate defines:
//! - [`DataType`]: nullable type descriptors for scalars, arrays, maps and structs
//! - [`ScalarValue`]: the immutable tagged runtime value
//! - [`ArrayValue`], [`MapValue`], [`StructValue`]: collection payloads that
//!   carry their own element types and null flags

pub mod type_system;
pub mod value;

pub use type_system::*;
pub use value::*;
