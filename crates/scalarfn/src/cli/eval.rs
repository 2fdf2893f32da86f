//! Evaluate a single function call

use super::args::parse_arguments;
use super::output::{format_value, format_warning, OutputFormat};
use anyhow::Result;
use scalarfn_eval::{FunctionConfig, FunctionEngine, Operand};
use scalarfn_types::ScalarValue;

/// Evaluation configuration
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub function: String,
    pub arguments: Vec<String>,
    pub function_config: FunctionConfig,
    pub output_format: OutputFormat,
    pub show_type: bool,
}

/// Resolve and evaluate the call, returning the rendered result
pub fn evaluate(config: &EvalConfig) -> Result<String> {
    let arguments = parse_arguments(&config.arguments)?;
    let (operands, row): (Vec<Operand>, Vec<ScalarValue>) = arguments
        .into_iter()
        .map(|argument| (argument.operand, argument.value))
        .unzip();

    let engine = FunctionEngine::with_config(config.function_config);
    let bound = engine.resolve(&config.function, &operands)?;
    let value = bound.evaluate(&row)?;

    if value.is_null() && !bound.nullable() {
        log::warn!("{} returned null but was resolved as non-null", config.function);
        eprintln!(
            "{}",
            format_warning("result is null although the call was resolved as non-null")
        );
    }

    let rendered = format_value(&value, config.output_format)?;
    if config.show_type {
        let nullability = if bound.nullable() { "" } else { " NOT NULL" };
        Ok(format!(
            "{}\n-- {}{}",
            rendered,
            bound.return_type(),
            nullability
        ))
    } else {
        Ok(rendered)
    }
}
