//! Minterm/maxterm classification and Hamming-weight bucketing.
//!
//! Two bit patterns can merge in Quine-McCluskey only if their weights
//! differ by exactly one, so bucketing terms by weight bounds the merge
//! comparisons to adjacent buckets instead of all pairs.

use std::collections::BTreeMap;

use crate::table::TruthTable;

/// Weight-indexed term buckets: weight -> ascending term values.
pub type Buckets = BTreeMap<u32, Vec<u64>>;

/// The classified rows of one truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terms {
    /// Rows where the function is true, ascending.
    pub minterms: Vec<u64>,
    /// Rows where the function is false, ascending.
    pub maxterms: Vec<u64>,
    /// Minterms bucketed by count of 1-bits.
    pub minterm_buckets: Buckets,
    /// Maxterms bucketed by count of 0-bits (within the table width).
    pub maxterm_buckets: Buckets,
}

/// Number of 1-bits in `value`.
pub fn ones(value: u64) -> u32 {
    value.count_ones()
}

/// Number of 0-bits in `value`, considering `width` bits.
pub fn zeros(value: u64, width: usize) -> u32 {
    width as u32 - ones(value)
}

/// Splits a truth table into weight-bucketed minterms and maxterms.
pub fn classify(table: &TruthTable) -> Terms {
    let width = table.num_vars();
    let mut minterms = Vec::new();
    let mut maxterms = Vec::new();
    let mut minterm_buckets = Buckets::new();
    let mut maxterm_buckets = Buckets::new();

    for (index, value) in table.iter() {
        if value {
            minterms.push(index);
            minterm_buckets.entry(ones(index)).or_default().push(index);
        } else {
            maxterms.push(index);
            maxterm_buckets
                .entry(zeros(index, width))
                .or_default()
                .push(index);
        }
    }

    Terms {
        minterms,
        maxterms,
        minterm_buckets,
        maxterm_buckets,
    }
}
