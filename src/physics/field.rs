//! Concentration field C(t, x)
//!
//! A `nt × nx` matrix where row `n` is the concentration profile at `t[n]`.
//! Row 0 is the initial condition, copied from the caller.

use nalgebra::DMatrix;
use std::fmt;

/// Concentration over time (rows) and space (columns) \[µg/m³\]
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationField {
    data: DMatrix<f64>,
}

impl ConcentrationField {
    /// All-zero field with `steps` rows and `nodes` columns
    pub fn zeros(steps: usize, nodes: usize) -> Self {
        Self {
            data: DMatrix::zeros(steps, nodes),
        }
    }

    /// Wrap an existing matrix
    pub fn from_matrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    /// Number of time levels nt
    pub fn steps(&self) -> usize {
        self.data.nrows()
    }

    /// Number of spatial nodes nx
    pub fn nodes(&self) -> usize {
        self.data.ncols()
    }

    /// `(nt, nx)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Concentration at time level `step`, node `node`
    pub fn get(&self, step: usize, node: usize) -> f64 {
        self.data[(step, node)]
    }

    /// Profile at time level `step`
    pub fn row(&self, step: usize) -> Vec<f64> {
        self.data.row(step).iter().copied().collect()
    }

    /// History of node `node` over all time levels
    pub fn column(&self, node: usize) -> Vec<f64> {
        self.data.column(node).iter().copied().collect()
    }

    /// Row 0
    pub fn initial_profile(&self) -> Vec<f64> {
        self.row(0)
    }

    /// Last row
    pub fn final_profile(&self) -> Vec<f64> {
        self.row(self.steps() - 1)
    }

    /// Overwrite time level `step`
    pub(crate) fn set_row(&mut self, step: usize, values: &[f64]) {
        debug_assert_eq!(values.len(), self.nodes());
        for (node, value) in values.iter().enumerate() {
            self.data[(step, node)] = *value;
        }
    }

    /// Rows as owned vectors, first row first
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.steps()).map(|step| self.row(step)).collect()
    }

    /// Underlying matrix
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Smallest value (+∞ for an empty field)
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest value (-∞ for an empty field)
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Whether every entry is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }
}

impl fmt::Display for ConcentrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConcentrationField [{} * {}]", self.steps(), self.nodes())
    }
}
