//! Resolved function calls
//!
//! A [`BoundFunction`] is produced once per call site by the resolver. It
//! carries the result type and a [`Kernel`] selecting the evaluation path, so
//! no per-row type inspection is needed.

use crate::config::FunctionConfig;
use crate::error::{FnResult, FunctionError};
use crate::functions::collection::{self, SetOperation};
use crate::functions::mask::{self, MaskChars, MaskRegion};
use crate::functions::{conditional, hash, map, math};
use crate::registry::ScalarFunction;
use scalarfn_types::{DataType, ScalarValue, StructField};

/// Evaluation path selected at resolution time
#[derive(Debug, Clone, PartialEq)]
pub enum Kernel {
    Size,
    ArrayDistinct,
    ArrayRemove,
    ArrayPosition,
    ArrayContains,
    ElementAtArray,
    ElementAtMap,
    Slice,
    ArrayRepeat { element_type: DataType },
    Flatten,
    ArraysZip { fields: Vec<StructField> },
    ConcatStrings,
    ConcatBinary,
    ConcatArrays { element_type: DataType },
    Reverse,
    SortArray { ascending: bool },
    ArraySort,
    ArrayMin,
    ArrayMax,
    ArraysOverlap,
    SetOperation(SetOperation),
    ArrayJoin,
    ArrayCompact,
    MapFromArrays,
    MapFromEntries,
    MapEntries,
    MapKeys,
    MapValues,
    Mask { region: MaskRegion, chars: MaskChars },
    MaskHash,
    Md5,
    Sha1,
    Sha2,
    Crc32,
    Hash,
    /// `promote` widens a bigint result to double
    Coalesce { promote: bool },
    Least { promote: bool },
    Greatest { promote: bool },
    /// Struct whose field values come from the argument `positions`
    MakeStruct {
        fields: Vec<StructField>,
        positions: Vec<usize>,
    },
    Pmod,
}

/// A resolved call, ready to evaluate rows
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFunction {
    pub(crate) function: ScalarFunction,
    pub(crate) kernel: Kernel,
    pub(crate) return_type: DataType,
    pub(crate) nullable: bool,
    pub(crate) arity: usize,
    pub(crate) config: FunctionConfig,
}

impl BoundFunction {
    /// Function being called
    pub fn function(&self) -> ScalarFunction {
        self.function
    }

    /// Selected evaluation path
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Type of every result
    pub fn return_type(&self) -> &DataType {
        &self.return_type
    }

    /// Whether a result may be null
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Number of arguments the call was resolved with
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Configuration captured at resolution time
    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }

    /// Evaluate one row
    pub fn evaluate(&self, args: &[ScalarValue]) -> FnResult<ScalarValue> {
        let name = self.function.name();
        if args.len() != self.arity {
            return Err(FunctionError::internal(
                name,
                format!(
                    "resolved for {} arguments, called with {}",
                    self.arity,
                    args.len()
                ),
            ));
        }
        log::trace!("Evaluating {} with {} arguments", name, args.len());

        let config = &self.config;
        let policy = config.map_key_dedup_policy;
        match (&self.kernel, args) {
            // Collection
            (Kernel::Size, [value]) => collection::size(value, config),
            (Kernel::ArrayDistinct, [array]) => collection::array_distinct(array),
            (Kernel::ArrayRemove, [array, element]) => collection::array_remove(array, element),
            (Kernel::ArrayPosition, [array, element]) => {
                collection::array_position(array, element)
            }
            (Kernel::ArrayContains, [array, value]) => collection::array_contains(array, value),
            (Kernel::ElementAtArray, [array, index]) => {
                collection::element_at(array, index, config.ansi_enabled)
            }
            (Kernel::ElementAtMap, [container, key]) => {
                map::element_at(container, key, config.ansi_enabled)
            }
            (Kernel::Slice, [array, start, length]) => collection::slice(array, start, length),
            (Kernel::ArrayRepeat { element_type }, [element, count]) => {
                collection::array_repeat(element, count, element_type, config.max_array_length)
            }
            (Kernel::Flatten, [array]) => collection::flatten(array),
            (Kernel::ArraysZip { fields }, arrays) => collection::arrays_zip(arrays, fields),
            (Kernel::ConcatStrings, parts) => collection::concat_strings(parts),
            (Kernel::ConcatBinary, parts) => collection::concat_binary(parts),
            (Kernel::ConcatArrays { element_type }, parts) => {
                collection::concat_arrays(parts, element_type)
            }
            (Kernel::Reverse, [value]) => collection::reverse(value),
            (Kernel::SortArray { ascending }, [array, ..]) => {
                collection::sort_array(array, *ascending)
            }
            (Kernel::ArraySort, [array]) => collection::array_sort(array),
            (Kernel::ArrayMin, [array]) => collection::array_min(array),
            (Kernel::ArrayMax, [array]) => collection::array_max(array),
            (Kernel::ArraysOverlap, [left, right]) => collection::arrays_overlap(left, right),
            (Kernel::SetOperation(operation), [left, right]) => {
                collection::set_operation(*operation, left, right)
            }
            (Kernel::ArrayJoin, [array, delimiter]) => {
                collection::array_join(array, delimiter, None)
            }
            (Kernel::ArrayJoin, [array, delimiter, replacement]) => {
                collection::array_join(array, delimiter, Some(replacement))
            }
            (Kernel::ArrayCompact, [array]) => collection::array_compact(array),

            // Map
            (Kernel::MapFromArrays, [keys, values]) => map::map_from_arrays(keys, values, policy),
            (Kernel::MapFromEntries, [entries]) => map::map_from_entries(entries, policy),
            (Kernel::MapEntries, [value]) => map::map_entries(value),
            (Kernel::MapKeys, [value]) => map::map_keys(value),
            (Kernel::MapValues, [value]) => map::map_values(value),

            // Mask
            (Kernel::Mask { region, chars }, [value, rest @ ..]) => {
                let count = match region {
                    MaskRegion::All => None,
                    _ => rest.first(),
                };
                mask::mask(value, *region, count, chars)
            }
            (Kernel::MaskHash, [value]) => mask::mask_hash(value),

            // Hash
            (Kernel::Md5, [value]) => hash::md5(value),
            (Kernel::Sha1, [value]) => hash::sha1(value),
            (Kernel::Sha2, [value, bits]) => hash::sha2(value, bits),
            (Kernel::Crc32, [value]) => hash::crc32(value),
            (Kernel::Hash, values) => hash::hash(values),

            // Conditional and construction
            (Kernel::Coalesce { promote }, values) => {
                Ok(promote_long(conditional::coalesce(values), *promote))
            }
            (Kernel::Least { promote }, values) => {
                Ok(promote_long(conditional::least(values), *promote))
            }
            (Kernel::Greatest { promote }, values) => {
                Ok(promote_long(conditional::greatest(values), *promote))
            }
            (Kernel::MakeStruct { fields, positions }, values) => {
                let picked: Vec<ScalarValue> = positions
                    .iter()
                    .map(|&idx| values.get(idx).cloned().unwrap_or(ScalarValue::Null))
                    .collect();
                conditional::make_struct(fields, &picked)
            }

            // Math
            (Kernel::Pmod, [a, b]) => math::pmod(a, b),

            (kernel, _) => Err(FunctionError::internal(
                name,
                format!("{:?} cannot take {} arguments", kernel, args.len()),
            )),
        }
    }
}

fn promote_long(value: ScalarValue, promote: bool) -> ScalarValue {
    match value {
        ScalarValue::Long(l) if promote => ScalarValue::Double(l as f64),
        other => other,
    }
}
