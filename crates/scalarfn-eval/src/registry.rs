//! Built-in function registry
//!
//! Maps function names (and aliases) to their definitions. The registry is
//! built once on first use and never mutated afterwards.

use crate::error::{FnResult, FunctionError};
use crate::operand::Operand;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Every built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFunction {
    // Collection
    Size,
    ArrayDistinct,
    ArrayRemove,
    ArrayPosition,
    ArrayContains,
    ElementAt,
    Slice,
    ArrayRepeat,
    Flatten,
    ArraysZip,
    Concat,
    Reverse,
    SortArray,
    ArraySort,
    ArrayMin,
    ArrayMax,
    ArraysOverlap,
    ArrayUnion,
    ArrayIntersect,
    ArrayExcept,
    ArrayJoin,
    ArrayCompact,
    // Map
    MapFromArrays,
    MapFromEntries,
    MapEntries,
    MapKeys,
    MapValues,
    // Mask
    Mask,
    MaskFirstN,
    MaskLastN,
    MaskShowFirstN,
    MaskShowLastN,
    MaskHash,
    // Hash
    Md5,
    Sha1,
    Sha2,
    Crc32,
    Hash,
    // Conditional and construction
    Coalesce,
    Least,
    Greatest,
    Struct,
    NamedStruct,
    // Math
    Pmod,
}

impl ScalarFunction {
    /// Canonical lower-case name
    pub fn name(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::ArrayDistinct => "array_distinct",
            Self::ArrayRemove => "array_remove",
            Self::ArrayPosition => "array_position",
            Self::ArrayContains => "array_contains",
            Self::ElementAt => "element_at",
            Self::Slice => "slice",
            Self::ArrayRepeat => "array_repeat",
            Self::Flatten => "flatten",
            Self::ArraysZip => "arrays_zip",
            Self::Concat => "concat",
            Self::Reverse => "reverse",
            Self::SortArray => "sort_array",
            Self::ArraySort => "array_sort",
            Self::ArrayMin => "array_min",
            Self::ArrayMax => "array_max",
            Self::ArraysOverlap => "arrays_overlap",
            Self::ArrayUnion => "array_union",
            Self::ArrayIntersect => "array_intersect",
            Self::ArrayExcept => "array_except",
            Self::ArrayJoin => "array_join",
            Self::ArrayCompact => "array_compact",
            Self::MapFromArrays => "map_from_arrays",
            Self::MapFromEntries => "map_from_entries",
            Self::MapEntries => "map_entries",
            Self::MapKeys => "map_keys",
            Self::MapValues => "map_values",
            Self::Mask => "mask",
            Self::MaskFirstN => "mask_first_n",
            Self::MaskLastN => "mask_last_n",
            Self::MaskShowFirstN => "mask_show_first_n",
            Self::MaskShowLastN => "mask_show_last_n",
            Self::MaskHash => "mask_hash",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha2 => "sha2",
            Self::Crc32 => "crc32",
            Self::Hash => "hash",
            Self::Coalesce => "coalesce",
            Self::Least => "least",
            Self::Greatest => "greatest",
            Self::Struct => "struct",
            Self::NamedStruct => "named_struct",
            Self::Pmod => "pmod",
        }
    }
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Function parameter definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParameter {
    /// Parameter name
    pub name: String,
    /// Whether the parameter can be omitted
    pub optional: bool,
    /// Whether the argument must be a constant
    pub constant: bool,
    /// Minimum repetitions if the parameter is variadic
    pub variadic: Option<usize>,
}

impl FunctionParameter {
    /// Create a required parameter
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            constant: false,
            variadic: None,
        }
    }

    /// Create an optional parameter
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }

    /// Create a trailing parameter repeated at least `minimum` times
    pub fn variadic(name: impl Into<String>, minimum: usize) -> Self {
        Self {
            variadic: Some(minimum),
            ..Self::required(name)
        }
    }

    /// Require the argument to be a constant
    pub fn constant(mut self) -> Self {
        self.constant = true;
        self
    }
}

/// Accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Fewest arguments accepted
    pub min: usize,
    /// Most arguments accepted, None if unbounded
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` arguments
    pub fn exact(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// `n` or more arguments
    pub fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    /// Check if `count` arguments are accepted
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    fn from_parameters(parameters: &[FunctionParameter]) -> Self {
        let mut min = 0;
        let mut max = Some(0);
        for parameter in parameters {
            match parameter.variadic {
                Some(repeat) => {
                    min += repeat;
                    max = None;
                }
                None => {
                    if !parameter.optional {
                        min += 1;
                    }
                    max = max.map(|m| m + 1);
                }
            }
        }
        Self { min, max }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{} to {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Function definition for the registry
#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    /// Canonical function name
    pub name: &'static str,
    /// Alternative names
    pub aliases: Vec<&'static str>,
    /// Function identity used for dispatch
    pub function: ScalarFunction,
    /// Parameters in order
    pub parameters: Vec<FunctionParameter>,
    /// Accepted argument counts
    pub arity: Arity,
    /// One-line description
    pub description: &'static str,
}

impl FunctionDefinition {
    /// Create a new function definition; the arity follows the parameters
    pub fn new(
        function: ScalarFunction,
        parameters: Vec<FunctionParameter>,
        description: &'static str,
    ) -> Self {
        let arity = Arity::from_parameters(&parameters);
        Self {
            name: function.name(),
            aliases: Vec::new(),
            function,
            parameters,
            arity,
            description,
        }
    }

    /// Add an alias
    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Override the derived arity
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Parameter describing the argument at `index` (0-based)
    pub fn parameter_at(&self, index: usize) -> Option<&FunctionParameter> {
        self.parameters.get(index).or_else(|| {
            self.parameters
                .last()
                .filter(|parameter| parameter.variadic.is_some())
        })
    }

    /// Check the argument count
    pub fn check_arity(&self, count: usize) -> FnResult<()> {
        if self.arity.accepts(count) {
            return Ok(());
        }
        if self.arity.max.is_none() {
            return Err(FunctionError::too_few_arguments(self.name, self.arity.min));
        }
        Err(FunctionError::WrongArgumentCount {
            function: self.name.to_string(),
            expected: self.arity.to_string(),
            found: count,
        })
    }

    /// Check that every constant-only parameter received a constant
    pub fn check_constants(&self, operands: &[Operand]) -> FnResult<()> {
        for (index, operand) in operands.iter().enumerate() {
            let Some(parameter) = self.parameter_at(index) else {
                continue;
            };
            if parameter.constant && !operand.is_foldable() {
                return Err(FunctionError::NonFoldableArgument {
                    function: self.name.to_string(),
                    position: index + 1,
                    parameter: parameter.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render a usage string, e.g. `mask(str[, upper[, lower[, digit]]])`
    pub fn usage(&self) -> String {
        let mut out = String::new();
        let mut open = 0;
        for (index, parameter) in self.parameters.iter().enumerate() {
            let separator = if index == 0 { "" } else { ", " };
            match parameter.variadic {
                Some(0) => {
                    out.push_str(&format!("{}[{}, ...]", separator, parameter.name));
                }
                Some(repeat) => {
                    out.push_str(separator);
                    for _ in 0..repeat {
                        out.push_str(&parameter.name);
                        out.push_str(", ");
                    }
                    out.push_str("...");
                }
                None if parameter.optional => {
                    out.push_str(&format!("[{}{}", separator, parameter.name));
                    open += 1;
                }
                None => {
                    out.push_str(separator);
                    out.push_str(&parameter.name);
                }
            }
        }
        out.push_str(&"]".repeat(open));
        format!("{}({})", self.name, out)
    }
}

/// Registry of built-in functions
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<&'static str, FunctionDefinition>,
    aliases: HashMap<&'static str, &'static str>,
}

static GLOBAL_REGISTRY: LazyLock<FunctionRegistry> =
    LazyLock::new(FunctionRegistry::with_builtin_functions);

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry of built-in functions
    pub fn global() -> &'static FunctionRegistry {
        &GLOBAL_REGISTRY
    }

    /// Create a registry holding every built-in function
    pub fn with_builtin_functions() -> Self {
        let mut registry = Self::new();
        registry.register_collection_functions();
        registry.register_map_functions();
        registry.register_mask_functions();
        registry.register_hash_functions();
        registry.register_conditional_functions();
        log::debug!(
            "Built function registry with {} functions and {} aliases",
            registry.functions.len(),
            registry.aliases.len()
        );
        registry
    }

    /// Register a function definition
    pub fn register(&mut self, definition: FunctionDefinition) {
        for alias in &definition.aliases {
            self.aliases.insert(*alias, definition.name);
        }
        self.functions.insert(definition.name, definition);
    }

    /// Look up a function by name or alias, ignoring case
    pub fn lookup(&self, name: &str) -> Option<&FunctionDefinition> {
        let name = name.to_ascii_lowercase();
        let canonical = self
            .aliases
            .get(name.as_str())
            .copied()
            .unwrap_or(name.as_str());
        self.functions.get(canonical)
    }

    /// Iterate over definitions in registration order
    pub fn definitions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.functions.values()
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn register_collection_functions(&mut self) {
        use FunctionParameter as P;
        use ScalarFunction as F;

        self.register(
            FunctionDefinition::new(
                F::Size,
                vec![P::required("expr")],
                "Number of elements in an array or entries in a map",
            )
            .with_alias("cardinality"),
        );
        self.register(FunctionDefinition::new(
            F::ArrayDistinct,
            vec![P::required("array")],
            "Removes duplicate values, keeping first occurrences",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayRemove,
            vec![P::required("array"), P::required("element")],
            "Removes all elements equal to element",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayPosition,
            vec![P::required("array"), P::required("element")],
            "1-based position of the first matching element, or 0",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayContains,
            vec![P::required("array"), P::required("value")],
            "Whether the array contains the value",
        ));
        self.register(FunctionDefinition::new(
            F::ElementAt,
            vec![P::required("container"), P::required("key")],
            "Element at a 1-based index, or the value for a map key",
        ));
        self.register(FunctionDefinition::new(
            F::Slice,
            vec![P::required("array"), P::required("start"), P::required("length")],
            "Subarray from a 1-based start index",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayRepeat,
            vec![P::required("element"), P::required("count")],
            "Array holding element count times",
        ));
        self.register(FunctionDefinition::new(
            F::Flatten,
            vec![P::required("arrayOfArrays")],
            "Concatenates nested arrays",
        ));
        self.register(FunctionDefinition::new(
            F::ArraysZip,
            vec![P::variadic("array", 0)],
            "Array of structs whose N-th struct holds the N-th values of the inputs",
        ));
        self.register(FunctionDefinition::new(
            F::Concat,
            vec![P::variadic("expr", 0)],
            "Concatenates strings, binaries or arrays",
        ));
        self.register(FunctionDefinition::new(
            F::Reverse,
            vec![P::required("expr")],
            "Reverses a string or an array",
        ));
        self.register(FunctionDefinition::new(
            F::SortArray,
            vec![P::required("array"), P::optional("ascending").constant()],
            "Sorts an array; nulls first when ascending, last when descending",
        ));
        self.register(FunctionDefinition::new(
            F::ArraySort,
            vec![P::required("array")],
            "Sorts an array ascending with nulls last",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayMin,
            vec![P::required("array")],
            "Smallest non-null element",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayMax,
            vec![P::required("array")],
            "Largest non-null element",
        ));
        self.register(FunctionDefinition::new(
            F::ArraysOverlap,
            vec![P::required("a1"), P::required("a2")],
            "Whether the arrays share a non-null element",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayUnion,
            vec![P::required("a1"), P::required("a2")],
            "Distinct elements of both arrays",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayIntersect,
            vec![P::required("a1"), P::required("a2")],
            "Distinct elements present in both arrays",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayExcept,
            vec![P::required("a1"), P::required("a2")],
            "Distinct elements of a1 absent from a2",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayJoin,
            vec![
                P::required("array"),
                P::required("delimiter"),
                P::optional("nullReplacement"),
            ],
            "Joins string elements with a delimiter",
        ));
        self.register(FunctionDefinition::new(
            F::ArrayCompact,
            vec![P::required("array")],
            "Removes null elements",
        ));
    }

    fn register_map_functions(&mut self) {
        use FunctionParameter as P;
        use ScalarFunction as F;

        self.register(FunctionDefinition::new(
            F::MapFromArrays,
            vec![P::required("keys"), P::required("values")],
            "Map built by pairing keys and values by position",
        ));
        self.register(FunctionDefinition::new(
            F::MapFromEntries,
            vec![P::required("entries")],
            "Map built from an array of key/value structs",
        ));
        self.register(FunctionDefinition::new(
            F::MapEntries,
            vec![P::required("map")],
            "Array of key/value structs",
        ));
        self.register(FunctionDefinition::new(
            F::MapKeys,
            vec![P::required("map")],
            "Array of the map's keys",
        ));
        self.register(FunctionDefinition::new(
            F::MapValues,
            vec![P::required("map")],
            "Array of the map's values",
        ));
    }

    fn register_mask_functions(&mut self) {
        use FunctionParameter as P;
        use ScalarFunction as F;

        let substitutions = || {
            vec![
                P::optional("upper").constant(),
                P::optional("lower").constant(),
                P::optional("digit").constant(),
            ]
        };
        let counted = |function: ScalarFunction, description: &'static str| {
            let mut parameters = vec![P::required("str"), P::optional("n")];
            parameters.extend(substitutions());
            FunctionDefinition::new(function, parameters, description)
        };

        let mut parameters = vec![P::required("str")];
        parameters.extend(substitutions());
        self.register(FunctionDefinition::new(
            F::Mask,
            parameters,
            "Replaces letters and digits with mask characters",
        ));
        self.register(counted(F::MaskFirstN, "Masks the first n characters"));
        self.register(counted(F::MaskLastN, "Masks the last n characters"));
        self.register(counted(
            F::MaskShowFirstN,
            "Masks all but the first n characters",
        ));
        self.register(counted(
            F::MaskShowLastN,
            "Masks all but the last n characters",
        ));
        self.register(FunctionDefinition::new(
            F::MaskHash,
            vec![P::required("str")],
            "Hex MD5 digest of a string",
        ));
    }

    fn register_hash_functions(&mut self) {
        use FunctionParameter as P;
        use ScalarFunction as F;

        self.register(FunctionDefinition::new(
            F::Md5,
            vec![P::required("expr")],
            "Hex MD5 digest",
        ));
        self.register(
            FunctionDefinition::new(F::Sha1, vec![P::required("expr")], "Hex SHA-1 digest")
                .with_alias("sha"),
        );
        self.register(FunctionDefinition::new(
            F::Sha2,
            vec![P::required("expr"), P::required("bitLength")],
            "Hex SHA-2 digest of 224, 256, 384 or 512 bits",
        ));
        self.register(FunctionDefinition::new(
            F::Crc32,
            vec![P::required("expr")],
            "CRC-32 checksum as a bigint",
        ));
        self.register(FunctionDefinition::new(
            F::Hash,
            vec![P::variadic("expr", 1)],
            "32-bit Murmur3 hash of the arguments",
        ));
    }

    fn register_conditional_functions(&mut self) {
        use FunctionParameter as P;
        use ScalarFunction as F;

        self.register(FunctionDefinition::new(
            F::Coalesce,
            vec![P::variadic("expr", 1)],
            "First non-null argument",
        ));
        self.register(FunctionDefinition::new(
            F::Least,
            vec![P::variadic("expr", 2)],
            "Smallest non-null argument",
        ));
        self.register(FunctionDefinition::new(
            F::Greatest,
            vec![P::variadic("expr", 2)],
            "Largest non-null argument",
        ));
        self.register(FunctionDefinition::new(
            F::Struct,
            vec![P::variadic("col", 1)],
            "Struct with fields col1, col2, ...",
        ));
        self.register(
            FunctionDefinition::new(
                F::NamedStruct,
                vec![P::variadic("name, value", 1)],
                "Struct with the given field names and values",
            )
            .with_arity(Arity::at_least(2)),
        );
        self.register(FunctionDefinition::new(
            F::Pmod,
            vec![P::required("dividend"), P::required("divisor")],
            "Positive modulo; the result takes the sign of the divisor",
        ));
    }
}
