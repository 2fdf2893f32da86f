//! Function Engine
//!
//! This module provides the [`FunctionEngine`], the entry point that turns a
//! function name plus argument descriptions into a [`BoundFunction`].

use crate::bound::BoundFunction;
use crate::config::FunctionConfig;
use crate::error::{FnResult, FunctionError};
use crate::operand::Operand;
use crate::registry::FunctionRegistry;
use crate::resolver;
use scalarfn_types::ScalarValue;

/// Resolves and evaluates scalar function calls under one configuration
#[derive(Debug, Clone, Copy)]
pub struct FunctionEngine {
    config: FunctionConfig,
    registry: &'static FunctionRegistry,
}

impl Default for FunctionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionEngine {
    /// Create an engine over the built-in functions with default settings
    pub fn new() -> Self {
        Self::with_config(FunctionConfig::default())
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: FunctionConfig) -> Self {
        Self {
            config,
            registry: FunctionRegistry::global(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }

    /// Function catalogue
    pub fn registry(&self) -> &'static FunctionRegistry {
        self.registry
    }

    /// Resolve a call by (case-insensitive) name
    pub fn resolve(&self, name: &str, operands: &[Operand]) -> FnResult<BoundFunction> {
        let definition = self
            .registry
            .lookup(name)
            .ok_or_else(|| FunctionError::undefined_function(name))?;
        let bound = resolver::resolve(definition, operands, self.config)?;
        log::debug!(
            "Resolved {}({} args) -> {}{}",
            definition.name,
            operands.len(),
            bound.return_type(),
            if bound.nullable() { "" } else { " not null" }
        );
        Ok(bound)
    }

    /// Resolve a call whose arguments are all constants, then evaluate it
    pub fn evaluate_literals(&self, name: &str, args: Vec<ScalarValue>) -> FnResult<ScalarValue> {
        let operands: Vec<Operand> = args.iter().cloned().map(Operand::literal).collect();
        self.resolve(name, &operands)?.evaluate(&args)
    }

    /// Evaluate a resolved call over several rows, stopping at the first error
    pub fn evaluate_rows(
        &self,
        bound: &BoundFunction,
        rows: &[Vec<ScalarValue>],
    ) -> FnResult<Vec<ScalarValue>> {
        rows.iter().map(|row| bound.evaluate(row)).collect()
    }
}
