//! Operation evaluation
//!
//! Maps an operation name and an operand list to a numeric result or a
//! structured validation error. Error messages and validation order are part
//! of the wire contract and must not change: negative operands are rejected
//! first, then the operand count, then division by zero, then unknown
//! operation names.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Supported arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sum,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Parse an operation name as it appears on the wire.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sum" => Some(Operation::Sum),
            "subtract" => Some(Operation::Subtract),
            "multiply" => Some(Operation::Multiply),
            "divide" => Some(Operation::Divide),
            _ => None,
        }
    }

    /// Wire name of the operation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured validation error for one operation.
///
/// Serializes to the wire error shape `{error, operation, operandos}`; the
/// unsupported-operation case carries no operand list.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct CalcError {
    #[serde(rename = "error")]
    pub message: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operandos: Option<Vec<f64>>,
}

impl CalcError {
    pub fn negative(num: f64, operation: &str, nums: &[f64]) -> Self {
        Self {
            message: format!("El número {} en la lista no puede ser negativo.", num),
            operation: operation.to_string(),
            operandos: Some(nums.to_vec()),
        }
    }

    pub fn too_few_operands(operation: &str, nums: &[f64]) -> Self {
        Self {
            message: format!("La operación '{}' requiere al menos 2 operandos.", operation),
            operation: operation.to_string(),
            operandos: Some(nums.to_vec()),
        }
    }

    pub fn division_by_zero(nums: &[f64]) -> Self {
        Self {
            message: "División por cero".to_string(),
            operation: Operation::Divide.as_str().to_string(),
            operandos: Some(nums.to_vec()),
        }
    }

    pub fn unsupported(operation: &str) -> Self {
        Self {
            message: "Operación no soportada".to_string(),
            operation: operation.to_string(),
            operandos: None,
        }
    }
}

/// Evaluate an operation over its operand list.
pub fn evaluate(op: &str, nums: &[f64]) -> Result<f64, CalcError> {
    evaluate_item(op, nums).map(|(_, result)| result)
}

/// Evaluate an operation, returning the parsed operation together with the
/// result for callers that persist the outcome.
///
/// The operation name is narrowed to [`Operation`] only after the operand
/// checks so that a malformed item reports its operand problem before an
/// unknown name.
pub fn evaluate_item(op: &str, nums: &[f64]) -> Result<(Operation, f64), CalcError> {
    if let Some(num) = nums.iter().find(|n| **n < 0.0) {
        return Err(CalcError::negative(*num, op, nums));
    }

    if nums.len() < 2 {
        return Err(CalcError::too_few_operands(op, nums));
    }

    let operation = Operation::parse(op).ok_or_else(|| CalcError::unsupported(op))?;

    if operation == Operation::Divide && nums[1..].iter().any(|n| *n == 0.0) {
        return Err(CalcError::division_by_zero(nums));
    }

    let result = match operation {
        Operation::Sum => nums.iter().sum(),
        Operation::Multiply => nums.iter().product(),
        // First operand minus the sum of the rest, not a pairwise fold
        Operation::Subtract => nums[0] - nums[1..].iter().sum::<f64>(),
        Operation::Divide => nums[1..].iter().fold(nums[0], |acc, n| acc / n),
    };

    Ok((operation, result))
}
