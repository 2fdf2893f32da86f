//! Errors raised while resolving or evaluating a function call

use scalarfn_diagnostics::{
    ErrorClass, ErrorCode, SFN0100, SFN0101, SFN0102, SFN0103, SFN0104, SFN0105, SFN0106,
    SFN0107, SFN0201, SFN0202, SFN0203, SFN0204, SFN0205, SFN0206, SFN0207, SFN0208, SFN0209,
    SFN0400,
};
use scalarfn_types::DataType;
use thiserror::Error;

/// Result type for resolution and evaluation
pub type FnResult<T> = Result<T, FunctionError>;

/// Errors that can occur while resolving or evaluating a function call.
///
/// Argument positions are 1-based.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FunctionError {
    // === Resolution errors ===
    /// Undefined function reference
    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    /// Fewer arguments than the function's minimum
    #[error("{function} requires {}", describe_minimum(*minimum))]
    TooFewArguments { function: String, minimum: usize },

    /// Argument count outside the accepted range
    #[error("{function} expects {expected} arguments, but found {found}")]
    WrongArgumentCount {
        function: String,
        expected: String,
        found: usize,
    },

    /// Argument of the wrong type category
    #[error("Argument {position} of {function} requires {expected}, but found {found}")]
    UnexpectedInputType {
        function: String,
        position: usize,
        expected: String,
        found: String,
    },

    /// Row-dependent expression where a constant is required
    #[error("Argument {position} ({parameter}) of {function} must be a constant")]
    NonFoldableArgument {
        function: String,
        position: usize,
        parameter: String,
    },

    /// Untyped null literal where a concrete type is required
    #[error("Argument {position} of {function} is an untyped null; {expected} is required")]
    UntypedNull {
        function: String,
        position: usize,
        expected: String,
    },

    /// Arguments whose types cannot be unified
    #[error(
        "Input to {function} should all be the same type, but found {types}; argument {position} does not match"
    )]
    IncompatibleInputTypes {
        function: String,
        position: usize,
        types: String,
    },

    /// Constant argument with an unacceptable value
    #[error("Invalid value for {parameter} in {function}: {message}")]
    InvalidParameter {
        function: String,
        parameter: String,
        message: String,
    },

    /// Ordering requested on a type that has none
    #[error("{function} does not support ordering on type {data_type}")]
    UnorderableType { function: String, data_type: String },

    // === Evaluation errors ===
    /// Zero index into an array
    #[error("Invalid index {index} in {function}: SQL array indices start at 1")]
    ZeroIndex { function: String, index: i64 },

    /// Index beyond the array bounds (ANSI mode)
    #[error("Index {index} out of bounds in {function} for array of length {length}")]
    IndexOutOfBounds {
        function: String,
        index: i64,
        length: usize,
    },

    /// Key absent from a map (ANSI mode)
    #[error("Key {key} does not exist in {function}")]
    MapKeyNotFound { function: String, key: String },

    /// Negative length argument
    #[error("Unexpected value for length in {function}: {length}; length must be greater than or equal to 0")]
    NegativeLength { function: String, length: i64 },

    /// Key and value arrays of different lengths
    #[error("The key array and value array of {function} should have the same length, but found {keys} and {values}")]
    LengthMismatch {
        function: String,
        keys: usize,
        values: usize,
    },

    /// Null used as a map key
    #[error("Cannot use null as map key in {function}")]
    NullMapKey { function: String },

    /// Duplicate map key under the exception policy
    #[error("Duplicate map key {key} was found in {function}")]
    DuplicateMapKey { function: String, key: String },

    /// Result array would exceed the configured limit
    #[error("{function} cannot create an array with {size} elements, which exceeds the limit of {limit}")]
    ArraySizeExceeded {
        function: String,
        size: i64,
        limit: usize,
    },

    /// Row-dependent argument with an unacceptable value
    #[error("Invalid value {value} for {parameter} in {function}")]
    InvalidArgumentValue {
        function: String,
        parameter: String,
        value: String,
    },

    // === System errors ===
    /// Internal error (should not happen)
    #[error("Internal error in {function}: {message}")]
    Internal { function: String, message: String },
}

fn describe_minimum(minimum: usize) -> String {
    match minimum {
        1 => "at least one argument".to_string(),
        2 => "at least two arguments".to_string(),
        n => format!("at least {} arguments", n),
    }
}

impl FunctionError {
    /// Stable error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedFunction { .. } => SFN0100,
            Self::TooFewArguments { .. } | Self::WrongArgumentCount { .. } => SFN0101,
            Self::UnexpectedInputType { .. } => SFN0102,
            Self::NonFoldableArgument { .. } => SFN0103,
            Self::UntypedNull { .. } => SFN0104,
            Self::IncompatibleInputTypes { .. } => SFN0105,
            Self::InvalidParameter { .. } => SFN0106,
            Self::UnorderableType { .. } => SFN0107,
            Self::ZeroIndex { .. } => SFN0201,
            Self::IndexOutOfBounds { .. } => SFN0202,
            Self::MapKeyNotFound { .. } => SFN0203,
            Self::NegativeLength { .. } => SFN0204,
            Self::LengthMismatch { .. } => SFN0205,
            Self::NullMapKey { .. } => SFN0206,
            Self::DuplicateMapKey { .. } => SFN0207,
            Self::ArraySizeExceeded { .. } => SFN0208,
            Self::InvalidArgumentValue { .. } => SFN0209,
            Self::Internal { .. } => SFN0400,
        }
    }

    /// Phase in which this error is raised
    pub fn class(&self) -> ErrorClass {
        self.code().class()
    }

    /// Check if this error was raised at resolution time
    pub fn is_resolution(&self) -> bool {
        self.class() == ErrorClass::Resolution
    }

    /// Check if this error was raised for a single row
    pub fn is_evaluation(&self) -> bool {
        self.class() == ErrorClass::Evaluation
    }

    /// Create an undefined function error
    pub fn undefined_function(name: impl Into<String>) -> Self {
        Self::UndefinedFunction { name: name.into() }
    }

    /// Create a too-few-arguments error
    pub fn too_few_arguments(function: impl Into<String>, minimum: usize) -> Self {
        Self::TooFewArguments {
            function: function.into(),
            minimum,
        }
    }

    /// Create an unexpected input type error
    pub fn unexpected_type(
        function: impl Into<String>,
        position: usize,
        expected: impl Into<String>,
        found: &DataType,
    ) -> Self {
        Self::UnexpectedInputType {
            function: function.into(),
            position,
            expected: expected.into(),
            found: found.sql_name(),
        }
    }

    /// Create an untyped null error
    pub fn untyped_null(
        function: impl Into<String>,
        position: usize,
        expected: impl Into<String>,
    ) -> Self {
        Self::UntypedNull {
            function: function.into(),
            position,
            expected: expected.into(),
        }
    }

    /// Create an incompatible input types error; `position` is the 1-based
    /// argument that failed to unify with those before it
    pub fn incompatible_types<'a>(
        function: impl Into<String>,
        position: usize,
        types: impl IntoIterator<Item = &'a DataType>,
    ) -> Self {
        let types: Vec<String> = types.into_iter().map(DataType::sql_name).collect();
        Self::IncompatibleInputTypes {
            function: function.into(),
            position,
            types: format!("[{}]", types.join(", ")),
        }
    }

    /// Create an invalid constant parameter error
    pub fn invalid_parameter(
        function: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            function: function.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an unorderable type error
    pub fn unorderable(function: impl Into<String>, data_type: &DataType) -> Self {
        Self::UnorderableType {
            function: function.into(),
            data_type: data_type.sql_name(),
        }
    }

    /// Create an internal error
    pub fn internal(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            function: function.into(),
            message: message.into(),
        }
    }
}
