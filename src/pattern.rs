//! Implicant patterns.
//!
//! A [`Pattern`] is a fixed-width word over `{0, 1, -}` where `-` marks a
//! don't-care position. It is stored as an integer+mask pair instead of a
//! character string: `mask` has a 1 at every cared position, and `bits`
//! holds the cared values (forced to 0 at don't-care positions, keeping
//! the representation canonical for `Eq`/`Hash`).
//!
//! Bit-string position `i` (leftmost = 0) corresponds to machine bit
//! `width - 1 - i`, matching the most-significant-variable-first
//! convention used by truth-table assignments.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A (possibly partially merged) implicant of fixed width.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    width: u32,
    mask: u32,
    bits: u32,
}

impl Pattern {
    /// Maximum representable width.
    pub const MAX_WIDTH: usize = 32;

    /// A pattern with all positions cared, i.e. a single minterm.
    ///
    /// # Panics
    ///
    /// Panics if `width` exceeds [`Pattern::MAX_WIDTH`] or `value` does
    /// not fit in `width` bits.
    pub fn from_minterm(value: u64, width: usize) -> Self {
        assert!(width <= Self::MAX_WIDTH, "pattern width out of range");
        assert!(
            value < (1u64 << width),
            "minterm {} does not fit in {} bits",
            value,
            width
        );
        let mask = if width == 32 {
            u32::MAX
        } else {
            (1u32 << width) - 1
        };
        Self {
            width: width as u32,
            mask,
            bits: value as u32,
        }
    }

    /// The all-don't-care pattern (constant true).
    pub fn all_dash(width: usize) -> Self {
        assert!(width <= Self::MAX_WIDTH, "pattern width out of range");
        Self {
            width: width as u32,
            mask: 0,
            bits: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Count of asserted (`1`) positions.
    pub fn ones(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Count of don't-care positions.
    pub fn dashes(&self) -> u32 {
        self.width - self.mask.count_ones()
    }

    pub fn is_all_dash(&self) -> bool {
        self.mask == 0
    }

    /// Whether the minterm `value` lies under this implicant.
    pub fn covers(&self, value: u64) -> bool {
        (value as u32) & self.mask == self.bits
    }

    /// Merges two patterns differing in exactly one cared position into a
    /// pattern with `-` there. Returns `None` when the don't-care masks
    /// disagree or more than one bit differs (identical patterns never
    /// reach this point in the reduction).
    pub fn combine(&self, other: &Self) -> Option<Self> {
        if self.width != other.width || self.mask != other.mask {
            return None;
        }
        let diff = self.bits ^ other.bits;
        if diff.count_ones() != 1 {
            return None;
        }
        let mask = self.mask & !diff;
        Some(Self {
            width: self.width,
            mask,
            bits: self.bits & mask,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            let c = if self.mask >> i & 1 == 0 {
                '-'
            } else if self.bits >> i & 1 == 1 {
                '1'
            } else {
                '0'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() > Self::MAX_WIDTH {
            return Err(Error::domain(format!("pattern `{}` is too wide", s)));
        }
        let mut mask = 0u32;
        let mut bits = 0u32;
        for c in s.chars() {
            mask <<= 1;
            bits <<= 1;
            match c {
                '-' => {}
                '0' => mask |= 1,
                '1' => {
                    mask |= 1;
                    bits |= 1;
                }
                _ => {
                    return Err(Error::domain(format!(
                        "pattern `{}` contains invalid character `{}`",
                        s, c
                    )));
                }
            }
        }
        Ok(Self {
            width: s.len() as u32,
            mask,
            bits,
        })
    }
}
