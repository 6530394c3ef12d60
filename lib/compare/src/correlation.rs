//! Pearson and Spearman correlation between two equal-length sequences

use crate::rank::average_ranks;
use reprsim_core::vector::{centered_correlation, is_constant, Centered};
use reprsim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Correlation coefficient used to compare two triangles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Product-moment correlation on the raw values
    Pearson,
    /// Pearson correlation on average ranks
    #[default]
    Spearman,
}

impl CorrelationMethod {
    pub const ALL: [CorrelationMethod; 2] =
        [CorrelationMethod::Pearson, CorrelationMethod::Spearman];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pearson" | "r" => Ok(CorrelationMethod::Pearson),
            "spearman" | "rho" => Ok(CorrelationMethod::Spearman),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Coefficients from comparing one pair of triangles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CorrelationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pearson: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spearman: Option<f64>,
}

impl CorrelationResult {
    pub fn get(&self, method: CorrelationMethod) -> Option<f64> {
        match method {
            CorrelationMethod::Pearson => self.pearson,
            CorrelationMethod::Spearman => self.spearman,
        }
    }

    pub fn set(&mut self, method: CorrelationMethod, value: f64) {
        match method {
            CorrelationMethod::Pearson => self.pearson = Some(value),
            CorrelationMethod::Spearman => self.spearman = Some(value),
        }
    }
}

/// Correlate two sequences of equal length.
///
/// Both sequences must hold only finite values; NaN or infinite entries fail
/// with `NonFiniteEntry` instead of propagating into the coefficient.
pub fn correlate_slices(x: &[f64], y: &[f64], method: CorrelationMethod) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(format!(
            "sequences of length {} and {}",
            x.len(),
            y.len()
        )));
    }
    check_finite(x, "first")?;
    check_finite(y, "second")?;
    match method {
        CorrelationMethod::Pearson => pearson(x, y),
        CorrelationMethod::Spearman => pearson(&average_ranks(x), &average_ranks(y)),
    }
}

fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    let cx = checked_center(x, "first")?;
    let cy = checked_center(y, "second")?;
    Ok(centered_correlation(&cx, &cy))
}

fn check_finite(v: &[f64], sequence: &'static str) -> Result<()> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(Error::NonFiniteEntry { sequence, index }),
        None => Ok(()),
    }
}

fn checked_center(v: &[f64], which: &'static str) -> Result<Centered> {
    let c = Centered::new(v);
    if is_constant(v) || c.is_degenerate() {
        return Err(Error::ZeroVariance(which));
    }
    Ok(c)
}
