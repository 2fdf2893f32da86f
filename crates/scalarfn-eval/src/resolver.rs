//! Call resolution
//!
//! Validates the shape of a call (argument count, argument types, constant
//! arguments) and derives its result type before any row is evaluated.

use crate::bound::{BoundFunction, Kernel};
use crate::config::FunctionConfig;
use crate::error::{FnResult, FunctionError};
use crate::functions::collection::{zip_fields, SetOperation};
use crate::functions::conditional::default_field_name;
use crate::functions::hash::SHA2_BIT_LENGTHS;
use crate::functions::map::entry_fields;
use crate::functions::mask::{MaskChars, MaskRegion};
use crate::operand::Operand;
use crate::registry::{FunctionDefinition, ScalarFunction};
use scalarfn_types::{DataType, ScalarValue, StructField};

/// Resolve a call to `definition` with the given operands
pub fn resolve(
    definition: &FunctionDefinition,
    operands: &[Operand],
    config: FunctionConfig,
) -> FnResult<BoundFunction> {
    definition.check_arity(operands.len())?;
    definition.check_constants(operands)?;

    let args = Args {
        function: definition.name,
        operands,
    };
    let (kernel, return_type, nullable) = bind(definition.function, &args, &config)?;
    Ok(BoundFunction {
        function: definition.function,
        kernel,
        return_type,
        nullable,
        arity: operands.len(),
        config,
    })
}

/// Kernel, result type and result nullability
type Binding = (Kernel, DataType, bool);

fn bind(function: ScalarFunction, args: &Args<'_>, config: &FunctionConfig) -> FnResult<Binding> {
    use ScalarFunction as F;

    match function {
        // === Collection ===
        F::Size => {
            let operand = args.get(0)?;
            match &operand.data_type {
                DataType::Null | DataType::Array { .. } | DataType::Map { .. } => {}
                other => return Err(args.unexpected(0, "array or map", other)),
            }
            let null_gives_minus_one = config.legacy_size_of_null && !config.ansi_enabled;
            Ok((
                Kernel::Size,
                DataType::Long,
                operand.nullable && !null_gives_minus_one,
            ))
        }
        F::ArrayDistinct => {
            let (element, _) = args.array(0)?;
            args.orderable(element)?;
            Ok((Kernel::ArrayDistinct, args.type_of(0)?, args.nullable(0)?))
        }
        F::ArrayRemove | F::ArrayPosition | F::ArrayContains => {
            let (element, contains_null) = args.array(0)?;
            args.orderable(element)?;
            args.search_value(1, element)?;
            let either_null = args.any_nullable();
            Ok(match function {
                F::ArrayRemove => (Kernel::ArrayRemove, args.type_of(0)?, either_null),
                F::ArrayPosition => (Kernel::ArrayPosition, DataType::Long, either_null),
                _ => (
                    Kernel::ArrayContains,
                    DataType::Boolean,
                    either_null || contains_null,
                ),
            })
        }
        F::ElementAt => {
            let container = args.get(0)?;
            match &container.data_type {
                DataType::Array { element_type, .. } => {
                    args.long(1)?;
                    Ok((Kernel::ElementAtArray, (**element_type).clone(), true))
                }
                DataType::Map {
                    key_type,
                    value_type,
                    ..
                } => {
                    args.search_value(1, key_type)?;
                    Ok((Kernel::ElementAtMap, (**value_type).clone(), true))
                }
                DataType::Null => Err(args.untyped_null(0, "array or map")),
                other => Err(args.unexpected(0, "array or map", other)),
            }
        }
        F::Slice => {
            args.array(0)?;
            args.long(1)?;
            args.long(2)?;
            Ok((Kernel::Slice, args.type_of(0)?, args.any_nullable()))
        }
        F::ArrayRepeat => {
            let element = args.get(0)?;
            args.long(1)?;
            Ok((
                Kernel::ArrayRepeat {
                    element_type: element.data_type.clone(),
                },
                DataType::array(element.data_type.clone(), element.nullable),
                args.nullable(1)?,
            ))
        }
        F::Flatten => {
            let (element, contains_null) = args.array(0)?;
            let Some((inner, inner_contains_null)) = element.array_element() else {
                return Err(args.unexpected(0, "array<array>", &args.type_of(0)?));
            };
            Ok((
                Kernel::Flatten,
                DataType::array(inner.clone(), inner_contains_null),
                args.nullable(0)? || contains_null,
            ))
        }
        F::ArraysZip => {
            let mut element_types = Vec::with_capacity(args.len());
            for idx in 0..args.len() {
                element_types.push(args.array(idx)?.0.clone());
            }
            let fields = zip_fields(&element_types);
            Ok((
                Kernel::ArraysZip {
                    fields: fields.clone(),
                },
                DataType::array(DataType::Struct(fields), false),
                args.any_nullable(),
            ))
        }
        F::Concat => bind_concat(args),
        F::Reverse => {
            let operand = args.get(0)?;
            let return_type = match &operand.data_type {
                DataType::Null | DataType::String => DataType::String,
                array @ DataType::Array { .. } => array.clone(),
                other => return Err(args.unexpected(0, "string or array", other)),
            };
            Ok((Kernel::Reverse, return_type, operand.nullable))
        }
        F::SortArray => {
            let (element, _) = args.array(0)?;
            args.orderable(element)?;
            let ascending = if args.len() > 1 {
                args.boolean_constant(1, "ascending")?
            } else {
                true
            };
            Ok((
                Kernel::SortArray { ascending },
                args.type_of(0)?,
                args.nullable(0)?,
            ))
        }
        F::ArraySort => {
            let (element, _) = args.array(0)?;
            args.orderable(element)?;
            Ok((Kernel::ArraySort, args.type_of(0)?, args.nullable(0)?))
        }
        F::ArrayMin | F::ArrayMax => {
            let (element, _) = args.array(0)?;
            args.orderable(element)?;
            let kernel = if function == F::ArrayMin {
                Kernel::ArrayMin
            } else {
                Kernel::ArrayMax
            };
            Ok((kernel, element.clone(), true))
        }
        F::ArraysOverlap => {
            let (left, left_null) = args.array(0)?;
            let (right, right_null) = args.array(1)?;
            let element = left.merge(right).ok_or_else(|| args.incompatible(1))?;
            args.orderable(&element)?;
            Ok((
                Kernel::ArraysOverlap,
                DataType::Boolean,
                args.any_nullable() || left_null || right_null,
            ))
        }
        F::ArrayUnion | F::ArrayIntersect | F::ArrayExcept => {
            let (left, left_null) = args.array(0)?;
            let (right, right_null) = args.array(1)?;
            let element = left.merge(right).ok_or_else(|| args.incompatible(1))?;
            args.orderable(&element)?;
            let (operation, contains_null) = match function {
                F::ArrayUnion => (SetOperation::Union, left_null || right_null),
                F::ArrayIntersect => (SetOperation::Intersect, left_null && right_null),
                _ => (SetOperation::Except, left_null),
            };
            Ok((
                Kernel::SetOperation(operation),
                DataType::array(element, contains_null),
                args.any_nullable(),
            ))
        }
        F::ArrayJoin => {
            let (element, _) = args.array(0)?;
            if *element != DataType::String {
                return Err(args.unexpected(0, "array<string>", &args.type_of(0)?));
            }
            for idx in 1..args.len() {
                args.string(idx)?;
            }
            Ok((Kernel::ArrayJoin, DataType::String, args.any_nullable()))
        }
        F::ArrayCompact => {
            let (element, _) = args.array(0)?;
            Ok((
                Kernel::ArrayCompact,
                DataType::array(element.clone(), false),
                args.nullable(0)?,
            ))
        }

        // === Map ===
        F::MapFromArrays => {
            let (key, _) = args.array(0)?;
            let (value, value_null) = args.array(1)?;
            args.orderable(key)?;
            Ok((
                Kernel::MapFromArrays,
                DataType::map(key.clone(), value.clone(), value_null),
                args.any_nullable(),
            ))
        }
        F::MapFromEntries => {
            let (element, contains_null) = args.array(0)?;
            let [key, value] = element.struct_fields().unwrap_or_default() else {
                return Err(args.unexpected(0, "array<struct<key,value>>", &args.type_of(0)?));
            };
            args.orderable(&key.data_type)?;
            Ok((
                Kernel::MapFromEntries,
                DataType::map(key.data_type.clone(), value.data_type.clone(), value.nullable),
                args.nullable(0)? || contains_null,
            ))
        }
        F::MapEntries | F::MapKeys | F::MapValues => {
            let (key, value, value_null) = args.map(0)?;
            let (kernel, return_type) = match function {
                F::MapEntries => (
                    Kernel::MapEntries,
                    DataType::array(
                        DataType::Struct(entry_fields(key, value, value_null)),
                        false,
                    ),
                ),
                F::MapKeys => (Kernel::MapKeys, DataType::array(key.clone(), false)),
                _ => (Kernel::MapValues, DataType::array(value.clone(), value_null)),
            };
            Ok((kernel, return_type, args.nullable(0)?))
        }

        // === Mask ===
        F::Mask => bind_mask(args, MaskRegion::All),
        F::MaskFirstN => bind_mask(args, MaskRegion::FirstN),
        F::MaskLastN => bind_mask(args, MaskRegion::LastN),
        F::MaskShowFirstN => bind_mask(args, MaskRegion::ShowFirstN),
        F::MaskShowLastN => bind_mask(args, MaskRegion::ShowLastN),
        F::MaskHash => {
            args.string(0)?;
            Ok((Kernel::MaskHash, DataType::String, args.nullable(0)?))
        }

        // === Hash ===
        F::Md5 | F::Sha1 | F::Crc32 => {
            args.string_or_binary(0)?;
            let binding = match function {
                F::Md5 => (Kernel::Md5, DataType::String),
                F::Sha1 => (Kernel::Sha1, DataType::String),
                _ => (Kernel::Crc32, DataType::Long),
            };
            Ok((binding.0, binding.1, args.nullable(0)?))
        }
        F::Sha2 => {
            args.string_or_binary(0)?;
            args.long(1)?;
            if let Some(ScalarValue::Long(bits)) = args.get(1)?.constant() {
                if !SHA2_BIT_LENGTHS.contains(bits) {
                    return Err(FunctionError::invalid_parameter(
                        args.function,
                        "bitLength",
                        format!("must be one of 224, 256, 384 or 512, got {}", bits),
                    ));
                }
            }
            Ok((Kernel::Sha2, DataType::String, args.any_nullable()))
        }
        F::Hash => {
            for (idx, operand) in args.operands.iter().enumerate() {
                // Maps have no significant iteration order to fold over
                if !operand.data_type.is_orderable() {
                    return Err(args.unexpected(idx, "a type without maps", &operand.data_type));
                }
            }
            Ok((Kernel::Hash, DataType::Long, false))
        }

        // === Conditional and construction ===
        F::Coalesce => {
            let (return_type, promote) = args.common_type()?;
            Ok((
                Kernel::Coalesce { promote },
                return_type,
                args.all_nullable(),
            ))
        }
        F::Least | F::Greatest => {
            let (return_type, promote) = args.common_type()?;
            args.orderable(&return_type)?;
            let kernel = if function == F::Least {
                Kernel::Least { promote }
            } else {
                Kernel::Greatest { promote }
            };
            Ok((kernel, return_type, args.all_nullable()))
        }
        F::Struct => {
            let fields: Vec<StructField> = args
                .operands
                .iter()
                .enumerate()
                .map(|(idx, operand)| {
                    StructField::new(
                        default_field_name(idx),
                        operand.data_type.clone(),
                        operand.nullable,
                    )
                })
                .collect();
            Ok((
                Kernel::MakeStruct {
                    fields: fields.clone(),
                    positions: (0..args.len()).collect(),
                },
                DataType::Struct(fields),
                false,
            ))
        }
        F::NamedStruct => bind_named_struct(args),

        // === Math ===
        F::Pmod => {
            let mut all_long = true;
            for idx in 0..args.len() {
                match args.type_of(idx)? {
                    DataType::Null | DataType::Long => {}
                    DataType::Double => all_long = false,
                    other => return Err(args.unexpected(idx, "numeric", &other)),
                }
            }
            let return_type = if all_long {
                DataType::Long
            } else {
                DataType::Double
            };
            Ok((Kernel::Pmod, return_type, true))
        }
    }
}

fn bind_concat(args: &Args<'_>) -> FnResult<Binding> {
    let mut common: Option<DataType> = None;
    for (idx, operand) in args.operands.iter().enumerate() {
        let data_type = &operand.data_type;
        match data_type {
            DataType::Null => continue,
            DataType::String | DataType::Binary | DataType::Array { .. } => {}
            other => return Err(args.unexpected(idx, "string, binary or array", other)),
        }
        common = Some(match common {
            None => data_type.clone(),
            Some(current) => current.merge(data_type).ok_or_else(|| args.incompatible(idx))?,
        });
    }

    let nullable = args.any_nullable();
    Ok(match common {
        None | Some(DataType::String) => (Kernel::ConcatStrings, DataType::String, nullable),
        Some(DataType::Binary) => (Kernel::ConcatBinary, DataType::Binary, nullable),
        Some(array) => {
            let element_type = array
                .array_element()
                .map(|(element, _)| element.clone())
                .unwrap_or_default();
            (Kernel::ConcatArrays { element_type }, array, nullable)
        }
    })
}

fn bind_mask(args: &Args<'_>, region: MaskRegion) -> FnResult<Binding> {
    args.string(0)?;
    let first_char = if region == MaskRegion::All {
        1
    } else {
        if args.len() > 1 {
            args.long(1)?;
        }
        2
    };
    for idx in first_char..args.len() {
        args.string(idx)?;
    }
    let constant = |idx: usize| args.operands.get(idx).and_then(Operand::constant);
    let chars = MaskChars::from_arguments(
        args.function,
        constant(first_char),
        constant(first_char + 1),
        constant(first_char + 2),
    )?;
    Ok((
        Kernel::Mask { region, chars },
        DataType::String,
        args.nullable(0)?,
    ))
}

fn bind_named_struct(args: &Args<'_>) -> FnResult<Binding> {
    if args.len() % 2 != 0 {
        return Err(FunctionError::WrongArgumentCount {
            function: args.function.to_string(),
            expected: "an even number of".to_string(),
            found: args.len(),
        });
    }

    let mut fields = Vec::with_capacity(args.len() / 2);
    let mut positions = Vec::with_capacity(args.len() / 2);
    for idx in (0..args.len()).step_by(2) {
        let name = args.get(idx)?;
        let value = args.get(idx + 1)?;
        let name = match name.constant() {
            None => {
                return Err(FunctionError::NonFoldableArgument {
                    function: args.function.to_string(),
                    position: idx + 1,
                    parameter: "name".to_string(),
                });
            }
            Some(ScalarValue::String(name)) => name.clone(),
            Some(_) => {
                return Err(FunctionError::invalid_parameter(
                    args.function,
                    "name",
                    format!("field name at argument {} must be a non-null string", idx + 1),
                ));
            }
        };
        fields.push(StructField::new(name, value.data_type.clone(), value.nullable));
        positions.push(idx + 1);
    }
    Ok((
        Kernel::MakeStruct {
            fields: fields.clone(),
            positions,
        },
        DataType::Struct(fields),
        false,
    ))
}

/// Operands of the call being resolved, with typed accessors that report
/// errors against the offending 1-based position
struct Args<'a> {
    function: &'static str,
    operands: &'a [Operand],
}

impl<'a> Args<'a> {
    fn len(&self) -> usize {
        self.operands.len()
    }

    fn get(&self, idx: usize) -> FnResult<&'a Operand> {
        self.operands.get(idx).ok_or_else(|| {
            FunctionError::internal(self.function, format!("missing argument {}", idx + 1))
        })
    }

    fn type_of(&self, idx: usize) -> FnResult<DataType> {
        Ok(self.get(idx)?.data_type.clone())
    }

    fn nullable(&self, idx: usize) -> FnResult<bool> {
        Ok(self.get(idx)?.nullable)
    }

    fn any_nullable(&self) -> bool {
        self.operands.iter().any(|operand| operand.nullable)
    }

    fn all_nullable(&self) -> bool {
        self.operands.iter().all(|operand| operand.nullable)
    }

    fn unexpected(&self, idx: usize, expected: &str, found: &DataType) -> FunctionError {
        FunctionError::unexpected_type(self.function, idx + 1, expected, found)
    }

    fn untyped_null(&self, idx: usize, expected: &str) -> FunctionError {
        FunctionError::untyped_null(self.function, idx + 1, expected)
    }

    fn incompatible(&self, idx: usize) -> FunctionError {
        FunctionError::incompatible_types(
            self.function,
            idx + 1,
            self.operands.iter().map(|operand| &operand.data_type),
        )
    }

    fn orderable(&self, data_type: &DataType) -> FnResult<()> {
        if data_type.is_orderable() {
            Ok(())
        } else {
            Err(FunctionError::unorderable(self.function, data_type))
        }
    }

    /// Element type and null flag of an array argument
    fn array(&self, idx: usize) -> FnResult<(&'a DataType, bool)> {
        let data_type = &self.get(idx)?.data_type;
        match data_type {
            DataType::Null => Err(self.untyped_null(idx, "array")),
            other => other
                .array_element()
                .ok_or_else(|| self.unexpected(idx, "array", other)),
        }
    }

    /// Key type, value type and value null flag of a map argument
    fn map(&self, idx: usize) -> FnResult<(&'a DataType, &'a DataType, bool)> {
        let data_type = &self.get(idx)?.data_type;
        match data_type {
            DataType::Null => Err(self.untyped_null(idx, "map")),
            other => other
                .map_entry()
                .ok_or_else(|| self.unexpected(idx, "map", other)),
        }
    }

    /// Scalar argument of one type; an untyped null stands for a null of it
    fn scalar(&self, idx: usize, accepted: &[DataType], expected: &str) -> FnResult<()> {
        let data_type = &self.get(idx)?.data_type;
        if data_type.is_null() || accepted.contains(data_type) {
            Ok(())
        } else {
            Err(self.unexpected(idx, expected, data_type))
        }
    }

    fn long(&self, idx: usize) -> FnResult<()> {
        self.scalar(idx, &[DataType::Long], "bigint")
    }

    fn string(&self, idx: usize) -> FnResult<()> {
        self.scalar(idx, &[DataType::String], "string")
    }

    fn string_or_binary(&self, idx: usize) -> FnResult<()> {
        self.scalar(
            idx,
            &[DataType::String, DataType::Binary],
            "string or binary",
        )
    }

    /// Non-null boolean constant
    fn boolean_constant(&self, idx: usize, parameter: &str) -> FnResult<bool> {
        let operand = self.get(idx)?;
        match operand.constant() {
            Some(ScalarValue::Boolean(value)) => Ok(*value),
            Some(ScalarValue::Null) => Err(FunctionError::invalid_parameter(
                self.function,
                parameter,
                "must not be null",
            )),
            _ => Err(self.unexpected(idx, "boolean", &operand.data_type)),
        }
    }

    /// Value searched for among elements or keys of type `target`.
    ///
    /// An untyped null is rejected because its type cannot be checked.
    fn search_value(&self, idx: usize, target: &DataType) -> FnResult<()> {
        let data_type = &self.get(idx)?.data_type;
        if data_type.is_null() {
            return Err(self.untyped_null(idx, &target.sql_name()));
        }
        if data_type.merge(target).is_none() {
            return Err(self.unexpected(idx, &target.sql_name(), data_type));
        }
        Ok(())
    }

    /// Common type of all operands; bigint and double meet at double, in
    /// which case the result must be promoted
    fn common_type(&self) -> FnResult<(DataType, bool)> {
        let mut common = DataType::Null;
        let mut promote = false;
        for (idx, operand) in self.operands.iter().enumerate() {
            common = match common.merge(&operand.data_type) {
                Some(merged) => merged,
                None if common.is_numeric() && operand.data_type.is_numeric() => {
                    promote = true;
                    DataType::Double
                }
                None => return Err(self.incompatible(idx)),
            };
        }
        Ok((common, promote))
    }
}
