//! Truth-table generation.
//!
//! A [`TruthTable`] is a total mapping from every fixed-width variable
//! assignment to a boolean: exactly `2^n` rows, one per assignment, no
//! gaps, no duplicates. Rows are indexed by the assignment interpreted as
//! an unsigned binary number, most-significant variable first, over the
//! alphabetically sorted variable ordering.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::eval::Evaluator;

/// Upper bound on the variable count.
///
/// The table is materialized in full (`2^n` rows) and the reduction is
/// exponential in the worst case; the engine is scoped for interactive,
/// human-sized problems.
pub const MAX_VARIABLES: usize = 24;

/// The complete truth table of one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    num_vars: usize,
    rows: Vec<bool>,
}

impl TruthTable {
    /// Evaluates `expression` over all `2^n` assignments of `variables`.
    ///
    /// `variables` must be the canonical (sorted) ordering; the bit at
    /// string position `i` of an assignment is the value of
    /// `variables[i]`.
    pub fn generate(expression: &str, variables: &[String]) -> Result<Self> {
        let n = variables.len();
        if n > MAX_VARIABLES {
            return Err(Error::resource(format!(
                "{} variables exceed the supported maximum of {}",
                n, MAX_VARIABLES
            )));
        }

        let evaluator = Evaluator::new(expression)?;
        let row_count = 1u64 << n;
        let mut rows = Vec::with_capacity(row_count as usize);
        let mut env: HashMap<String, bool> = HashMap::with_capacity(n);
        for index in 0..row_count {
            for (i, var) in variables.iter().enumerate() {
                let bit = (index >> (n - 1 - i)) & 1 == 1;
                env.insert(var.clone(), bit);
            }
            rows.push(evaluator.evaluate(&env)?);
        }
        Ok(Self { num_vars: n, rows })
    }

    /// Builds a table directly from its row values.
    ///
    /// Fails with [`Error::Domain`] unless `rows` has exactly `2^n`
    /// entries.
    pub fn from_rows(num_vars: usize, rows: Vec<bool>) -> Result<Self> {
        if num_vars > MAX_VARIABLES {
            return Err(Error::resource(format!(
                "{} variables exceed the supported maximum of {}",
                num_vars, MAX_VARIABLES
            )));
        }
        if rows.len() != 1 << num_vars {
            return Err(Error::domain(format!(
                "{} rows do not form a complete table over {} variables",
                rows.len(),
                num_vars
            )));
        }
        Ok(Self { num_vars, rows })
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of rows, always `2^n`.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        false // a table always has at least the single zero-variable row
    }

    /// Row value by numeric index, or `None` when out of range.
    pub fn get(&self, index: u64) -> Option<bool> {
        self.rows.get(index as usize).copied()
    }

    /// Row value by assignment bit-string.
    ///
    /// Fails with [`Error::Domain`] when the string length differs from
    /// the variable count or contains characters other than `0`/`1`.
    pub fn value_for(&self, assignment: &str) -> Result<bool> {
        let index = self.assignment_index(assignment)?;
        Ok(self.rows[index as usize])
    }

    /// Parses an assignment bit-string into its row index.
    pub fn assignment_index(&self, assignment: &str) -> Result<u64> {
        if assignment.len() != self.num_vars {
            return Err(Error::domain(format!(
                "assignment `{}` has {} bits, expected {}",
                assignment,
                assignment.len(),
                self.num_vars
            )));
        }
        let mut index = 0u64;
        for c in assignment.chars() {
            index <<= 1;
            match c {
                '0' => {}
                '1' => index |= 1,
                _ => {
                    return Err(Error::domain(format!(
                        "assignment `{}` contains non-binary character `{}`",
                        assignment, c
                    )));
                }
            }
        }
        Ok(index)
    }

    /// Renders a row index as a zero-padded assignment bit-string.
    pub fn assignment_string(&self, index: u64) -> String {
        let mut s = String::with_capacity(self.num_vars);
        for i in (0..self.num_vars).rev() {
            s.push(if (index >> i) & 1 == 1 { '1' } else { '0' });
        }
        s
    }

    /// Iterates rows as `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, bool)> + '_ {
        self.rows.iter().enumerate().map(|(i, &v)| (i as u64, v))
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.iter() {
            writeln!(
                f,
                "{} {}",
                self.assignment_string(index),
                if value { 1 } else { 0 }
            )?;
        }
        Ok(())
    }
}
