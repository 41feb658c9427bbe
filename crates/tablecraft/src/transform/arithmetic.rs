//! Column arithmetic: unary transforms and multi-column combinations.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Result, TablecraftError};
use crate::value::{MISSING, parse_float_prefix};

/// Unary transform applied to a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryFn {
    /// `value ^ n`
    Power,
    /// `n ^ value`
    Exponential,
    /// `log_n(value)`
    Logarithm,
}

/// Configuration for a single-column transform. The result replaces the
/// column's cells in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnarySpec {
    /// Target column.
    pub column: String,
    /// Transform to apply.
    pub function: UnaryFn,
    /// The transform's parameter `n`.
    pub n: f64,
    /// Multiplier applied after the transform.
    #[serde(default = "default_prefactor")]
    pub prefactor: f64,
}

fn default_prefactor() -> f64 {
    1.0
}

/// Binary operator in a multi-column chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        })
    }
}

/// Configuration for combining two or more columns into a derived column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineSpec {
    /// Input columns, in evaluation order.
    pub columns: Vec<String>,
    /// Per-column multipliers; absent columns default to 1.
    #[serde(default)]
    pub prefactors: HashMap<String, f64>,
    /// Operators between consecutive columns; must number one fewer than
    /// the columns.
    pub operators: Vec<BinaryOp>,
}

impl CombineSpec {
    fn prefactor(&self, column: &str) -> f64 {
        self.prefactors.get(column).copied().unwrap_or(1.0)
    }

    /// The generated name of the derived column, e.g. `"1A *2B"`. Users
    /// rely on this format to identify derived columns later.
    pub fn derived_name(&self) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let prefactor = self.prefactor(col);
                if i == 0 {
                    format!("{prefactor}{col}")
                } else {
                    format!("{}{prefactor}{col}", self.operators[i - 1])
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Apply a unary transform to one column, in place.
///
/// Cells without a numeric prefix are left unchanged.
pub fn map_column(dataset: &Dataset, spec: &UnarySpec) -> Result<Dataset> {
    let index = dataset.column_index(&spec.column)?;

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let value = parse_float_prefix(&row[index]);
            if value.is_nan() {
                return row.clone();
            }
            let transformed = match spec.function {
                UnaryFn::Power => value.powf(spec.n),
                UnaryFn::Exponential => spec.n.powf(value),
                UnaryFn::Logarithm => value.ln() / spec.n.ln(),
            };
            let result = transformed * spec.prefactor;
            let mut row = row.clone();
            row[index] = if result.is_nan() {
                MISSING.to_string()
            } else {
                result.to_string()
            };
            row
        })
        .collect();

    Ok(Dataset {
        columns: dataset.columns.clone(),
        rows,
    })
}

/// Evaluate a left-associative column chain and append the result as a new
/// column named by [`CombineSpec::derived_name`].
///
/// There is no operator precedence: `a + b * c` is `(a + b) * c`. Division
/// by a zero operand yields NaN, and any NaN result is written as the
/// literal `"NaN"` marker.
pub fn combine_columns(dataset: &Dataset, spec: &CombineSpec) -> Result<Dataset> {
    if spec.columns.len() < 2 {
        return Err(TablecraftError::Config(
            "combining requires at least two columns".to_string(),
        ));
    }
    if spec.operators.len() != spec.columns.len() - 1 {
        return Err(TablecraftError::Config(format!(
            "{} columns need {} operators, got {}",
            spec.columns.len(),
            spec.columns.len() - 1,
            spec.operators.len()
        )));
    }
    let indices = dataset.column_indices(&spec.columns)?;
    let prefactors: Vec<f64> = spec.columns.iter().map(|c| spec.prefactor(c)).collect();

    let mut columns = dataset.columns.clone();
    columns.push(spec.derived_name());

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let mut acc = prefactors[0] * parse_float_prefix(&row[indices[0]]);
            for (i, &index) in indices.iter().enumerate().skip(1) {
                let current = prefactors[i] * parse_float_prefix(&row[index]);
                acc = match spec.operators[i - 1] {
                    BinaryOp::Add => acc + current,
                    BinaryOp::Subtract => acc - current,
                    BinaryOp::Multiply => acc * current,
                    BinaryOp::Divide => {
                        if current == 0.0 {
                            f64::NAN
                        } else {
                            acc / current
                        }
                    }
                };
            }
            let mut row = row.clone();
            row.push(if acc.is_nan() {
                MISSING.to_string()
            } else {
                acc.to_string()
            });
            row
        })
        .collect();

    Ok(Dataset { columns, rows })
}
