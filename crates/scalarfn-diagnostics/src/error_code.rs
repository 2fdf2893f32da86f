//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - SFN0100-SFN0199: Resolution errors (arity, operand types, constant-ness)
//! - SFN0200-SFN0299: Evaluation errors (per-row contract violations)
//! - SFN0400-SFN0499: System errors (internal invariants)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

/// The phase in which an error is raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Raised once per call site, before any row is processed
    Resolution,
    /// Raised for a single row's computation
    Evaluation,
    /// Broken internal invariant
    System,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "resolution"),
            Self::Evaluation => write!(f, "evaluation"),
            Self::System => write!(f, "system"),
        }
    }
}

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a resolution error (0100-0199)
    pub const fn is_resolution_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an evaluation error (0200-0299)
    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// The class this code belongs to
    pub const fn class(&self) -> ErrorClass {
        if self.is_resolution_error() {
            ErrorClass::Resolution
        } else if self.is_evaluation_error() {
            ErrorClass::Evaluation
        } else {
            ErrorClass::System
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SFN{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Resolution errors (0100-0199)
    map.insert(100, ErrorInfo::new("Undefined function"));
    map.insert(
        101,
        ErrorInfo::new("Invalid argument count")
            .with_help("Check the function usage with `sfn list`"),
    );
    map.insert(102, ErrorInfo::new("Invalid argument type"));
    map.insert(
        103,
        ErrorInfo::new("Argument must be a constant")
            .with_help("Replace the column reference with a literal value"),
    );
    map.insert(
        104,
        ErrorInfo::new("Untyped null argument")
            .with_help("Cast the null literal to the expected type"),
    );
    map.insert(105, ErrorInfo::new("Incompatible argument types"));
    map.insert(106, ErrorInfo::new("Invalid constant argument value"));
    map.insert(107, ErrorInfo::new("Type does not support ordering"));

    // Evaluation errors (0200-0299)
    map.insert(
        201,
        ErrorInfo::new("Invalid index").with_help("SQL array indices start at 1"),
    );
    map.insert(202, ErrorInfo::new("Index out of bounds"));
    map.insert(203, ErrorInfo::new("Map key not found"));
    map.insert(204, ErrorInfo::new("Invalid length"));
    map.insert(205, ErrorInfo::new("Array length mismatch"));
    map.insert(206, ErrorInfo::new("Null map key"));
    map.insert(
        207,
        ErrorInfo::new("Duplicate map key")
            .with_help("Use the last-win map key dedup policy to keep the last value"),
    );
    map.insert(208, ErrorInfo::new("Array size limit exceeded"));
    map.insert(209, ErrorInfo::new("Invalid argument value"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));

    map
});

// Resolution errors
pub const SFN0100: ErrorCode = ErrorCode::new(100);
pub const SFN0101: ErrorCode = ErrorCode::new(101);
pub const SFN0102: ErrorCode = ErrorCode::new(102);
pub const SFN0103: ErrorCode = ErrorCode::new(103);
pub const SFN0104: ErrorCode = ErrorCode::new(104);
pub const SFN0105: ErrorCode = ErrorCode::new(105);
pub const SFN0106: ErrorCode = ErrorCode::new(106);
pub const SFN0107: ErrorCode = ErrorCode::new(107);

// Evaluation errors
pub const SFN0201: ErrorCode = ErrorCode::new(201);
pub const SFN0202: ErrorCode = ErrorCode::new(202);
pub const SFN0203: ErrorCode = ErrorCode::new(203);
pub const SFN0204: ErrorCode = ErrorCode::new(204);
pub const SFN0205: ErrorCode = ErrorCode::new(205);
pub const SFN0206: ErrorCode = ErrorCode::new(206);
pub const SFN0207: ErrorCode = ErrorCode::new(207);
pub const SFN0208: ErrorCode = ErrorCode::new(208);
pub const SFN0209: ErrorCode = ErrorCode::new(209);

// System errors
pub const SFN0400: ErrorCode = ErrorCode::new(400);
