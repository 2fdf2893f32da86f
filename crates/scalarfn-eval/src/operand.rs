//! Resolution-time description of a call argument

use scalarfn_types::{DataType, ScalarValue};

/// One argument of a call as seen before any row is evaluated.
///
/// Carries the argument's type, whether it may be null, and its value when
/// the argument is a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    /// Static type of the argument
    pub data_type: DataType,
    /// Whether the argument may evaluate to null
    pub nullable: bool,
    /// Constant value, if the argument is foldable
    pub literal: Option<ScalarValue>,
}

impl Operand {
    /// A row-dependent argument of the given type
    pub fn column(data_type: DataType, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
            literal: None,
        }
    }

    /// A constant argument; a bare null becomes an untyped null
    pub fn literal(value: ScalarValue) -> Self {
        Self {
            data_type: value.data_type(),
            nullable: value.is_null(),
            literal: Some(value),
        }
    }

    /// A constant null of a known type
    pub fn typed_null(data_type: DataType) -> Self {
        Self {
            data_type,
            nullable: true,
            literal: Some(ScalarValue::Null),
        }
    }

    /// Check if the argument's value is known at resolution time
    pub fn is_foldable(&self) -> bool {
        self.literal.is_some()
    }

    /// Check if the argument is a null literal with no type
    pub fn is_untyped_null(&self) -> bool {
        self.data_type.is_null()
    }

    /// Constant value of a foldable argument
    pub fn constant(&self) -> Option<&ScalarValue> {
        self.literal.as_ref()
    }
}
