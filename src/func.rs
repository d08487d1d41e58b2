//! The Boolean function type and the engine's public operation set.
//!
//! A [`BoolFunc`] is created once from raw text and never mutated:
//! operations that "transform" it produce new values. The truth table is
//! computed at construction; the minimized SOP form is computed lazily on
//! first request and cached write-once, which is sound because the
//! function is immutable.
//!
//! # Example
//!
//! ```rust
//! use boolfn_rs::func::BoolFunc;
//!
//! let f = BoolFunc::parse("f(a, b, c, d) = a*b + a*~b*c + a*~b*~c").unwrap();
//! let minimal = f.min_sop().unwrap();
//! assert_eq!(minimal.expression(), "a");
//! ```

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::cover::select_cover;
use crate::error::{Error, Result};
use crate::format::{format_sop, render_product};
use crate::normalize::normalize;
use crate::pattern::Pattern;
use crate::reduce::{reduce, ReduceLimits};
use crate::table::TruthTable;
use crate::term::{classify, Buckets, Terms};

/// A parsed, immutable Boolean function.
#[derive(Debug, Clone)]
pub struct BoolFunc {
    name: String,
    variables: Vec<String>,
    expression: String,
    table: TruthTable,
    terms: Terms,
    min_sop: OnceCell<String>,
}

impl BoolFunc {
    /// Parses raw text in any of the three accepted forms: `a+b`,
    /// `f = a+b`, or `f(a,b) = a+b`. Bare expressions get the default
    /// name `f`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_named(text, "f")
    }

    /// Like [`parse`][Self::parse], with an explicit default name for
    /// inputs that do not carry one.
    pub fn parse_named(text: &str, default_name: &str) -> Result<Self> {
        let normalized = normalize(text, default_name)?;
        let table = TruthTable::generate(&normalized.expression, &normalized.variables)?;
        let terms = classify(&table);
        debug!(
            "parsed `{}`: {} variables, {} minterms",
            normalized.name,
            normalized.variables.len(),
            terms.minterms.len()
        );
        Ok(Self {
            name: normalized.name,
            variables: normalized.variables,
            expression: normalized.expression,
            table,
            terms,
            min_sop: OnceCell::new(),
        })
    }

    /// Builds a function directly from its on-set.
    ///
    /// The variable ordering is the sorted one, regardless of the order
    /// given. The stored expression is the canonical minterm expansion.
    pub fn from_minterms(variables: &[&str], minterms: &[u64]) -> Result<Self> {
        let normalized = normalize(
            &format!("f({}) = 0", variables.join(",")),
            "f",
        )?;
        let variables = normalized.variables;
        let n = variables.len();

        let mut rows = vec![false; 1usize << n];
        for &m in minterms {
            let row = rows.get_mut(m as usize).ok_or_else(|| {
                Error::domain(format!("minterm {} does not fit in {} variables", m, n))
            })?;
            *row = true;
        }
        let table = TruthTable::from_rows(n, rows)?;
        let terms = classify(&table);

        let patterns: Vec<Pattern> = terms
            .minterms
            .iter()
            .map(|&m| Pattern::from_minterm(m, n))
            .collect();
        let expression = format_sop(&patterns, &variables);

        Ok(Self {
            name: "f".to_string(),
            variables,
            expression,
            table,
            terms,
            min_sop: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alphabetically sorted variable ordering every assignment
    /// bit-string refers to.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Canonical expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn truth_table(&self) -> &TruthTable {
        &self.table
    }

    /// Input assignments where the function is true, ascending.
    pub fn minterms(&self) -> &[u64] {
        &self.terms.minterms
    }

    /// Input assignments where the function is false, ascending.
    pub fn maxterms(&self) -> &[u64] {
        &self.terms.maxterms
    }

    /// Minterms bucketed by count of 1-bits.
    pub fn minterm_buckets(&self) -> &Buckets {
        &self.terms.minterm_buckets
    }

    /// Maxterms bucketed by count of 0-bits.
    pub fn maxterm_buckets(&self) -> &Buckets {
        &self.terms.maxterm_buckets
    }

    /// Plugs a fixed-width assignment bit-string into the function.
    ///
    /// Fails with [`Error::Domain`] when the assignment length differs
    /// from the variable count or contains non-binary characters.
    pub fn substitute(&self, assignment: &str) -> Result<bool> {
        self.table.value_for(assignment)
    }

    /// Minimal sum-of-products form via Quine-McCluskey, as a new
    /// function over the same variables. Cached after the first call.
    pub fn min_sop(&self) -> Result<BoolFunc> {
        let sop = self.cached_sop(&ReduceLimits::default())?;
        Ok(self.derived(format!("{}_min_sop", self.name), sop))
    }

    /// Like [`min_sop`][Self::min_sop], honoring a reduction bound; a
    /// violation surfaces as
    /// [`Error::ResourceExceeded`] rather than blocking indefinitely.
    pub fn min_sop_bounded(&self, limits: &ReduceLimits) -> Result<BoolFunc> {
        let sop = self.cached_sop(limits)?;
        Ok(self.derived(format!("{}_min_sop", self.name), sop))
    }

    /// Minimal product-of-sums form.
    ///
    /// Not implemented: the upstream POS path was never finished, and
    /// this engine keeps that as a documented gap rather than guessing.
    pub fn min_pos(&self) -> Result<BoolFunc> {
        Err(Error::Unsupported {
            operation: "product-of-sums minimization".to_string(),
        })
    }

    /// Canonical minterm (sum-of-products) expansion.
    pub fn min_expand(&self) -> BoolFunc {
        let expression = if self.terms.minterms.is_empty() {
            "0".to_string()
        } else {
            let n = self.variables.len();
            self.terms
                .minterms
                .iter()
                .map(|&m| render_product(&Pattern::from_minterm(m, n), &self.variables))
                .collect::<Vec<String>>()
                .join(" + ")
        };
        self.derived(format!("{}_min_expand", self.name), expression)
    }

    /// Canonical maxterm (product-of-sums) expansion.
    pub fn max_expand(&self) -> BoolFunc {
        let expression = if self.terms.maxterms.is_empty() {
            "1".to_string()
        } else {
            self.terms
                .maxterms
                .iter()
                .map(|&m| self.render_sum(m))
                .collect::<Vec<String>>()
                .join(" * ")
        };
        self.derived(format!("{}_max_expand", self.name), expression)
    }

    /// One maxterm as a bracketed sum: bit 1 negates the variable, bit 0
    /// keeps it.
    fn render_sum(&self, maxterm: u64) -> String {
        let n = self.variables.len();
        let literals: Vec<String> = self
            .variables
            .iter()
            .enumerate()
            .map(|(i, var)| {
                if (maxterm >> (n - 1 - i)) & 1 == 1 {
                    format!("~{}", var)
                } else {
                    var.clone()
                }
            })
            .collect();
        format!("({})", literals.join(" + "))
    }

    /// OR of two functions, by textual combination.
    pub fn or(&self, other: &BoolFunc) -> Result<BoolFunc> {
        self.combine_with(other, '+', "OR")
    }

    /// AND of two functions.
    pub fn and(&self, other: &BoolFunc) -> Result<BoolFunc> {
        self.combine_with(other, '*', "AND")
    }

    /// XOR of two functions.
    pub fn xor(&self, other: &BoolFunc) -> Result<BoolFunc> {
        self.combine_with(other, '%', "XOR")
    }

    /// NAND of two functions.
    pub fn nand(&self, other: &BoolFunc) -> Result<BoolFunc> {
        self.combine_with(other, '|', "NAND")
    }

    /// NOR of two functions.
    pub fn nor(&self, other: &BoolFunc) -> Result<BoolFunc> {
        self.combine_with(other, '-', "NOR")
    }

    /// Complement of the function.
    pub fn complement(&self) -> Result<BoolFunc> {
        BoolFunc::parse_named(
            &format!("~({})", self.expression),
            &format!("{}_NOT", self.name),
        )
    }

    fn combine_with(&self, other: &BoolFunc, op: char, tag: &str) -> Result<BoolFunc> {
        BoolFunc::parse_named(
            &format!("({}){}({})", self.expression, op, other.expression),
            &format!("{}_{}_{}", self.name, tag, other.name),
        )
    }

    /// Computes (or retrieves) the minimized SOP string. The cache is
    /// write-once; a bounded run that fails caches nothing.
    fn cached_sop(&self, limits: &ReduceLimits) -> Result<String> {
        if let Some(sop) = self.min_sop.get() {
            return Ok(sop.clone());
        }
        let sop = self.compute_sop(limits)?;
        let _ = self.min_sop.set(sop.clone());
        Ok(sop)
    }

    fn compute_sop(&self, limits: &ReduceLimits) -> Result<String> {
        // Degenerate constants skip the reduction entirely.
        if self.terms.minterms.is_empty() {
            return Ok("0".to_string());
        }
        if self.terms.maxterms.is_empty() {
            return Ok("1".to_string());
        }

        let n = self.variables.len();
        let reduction = reduce(&self.terms.minterm_buckets, n, limits)?;
        let cover = select_cover(&self.terms.minterms, &reduction.primes, &reduction.registry);
        Ok(format_sop(&cover, &self.variables))
    }

    /// A new function with the same semantics (table, variables, caches)
    /// but a different name and surface expression.
    fn derived(&self, name: String, expression: String) -> BoolFunc {
        let mut derived = self.clone();
        derived.name = name;
        derived.expression = expression;
        derived
    }
}

/// Equality is truth-table equality, not syntactic equality.
impl PartialEq for BoolFunc {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl Eq for BoolFunc {}

impl FromStr for BoolFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BoolFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) = {}",
            self.name,
            self.variables.join(", "),
            self.expression
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_parse_forms() {
        let bare = BoolFunc::parse("a+b").unwrap();
        assert_eq!(bare.name(), "f");
        let named = BoolFunc::parse("g = a+b").unwrap();
        assert_eq!(named.name(), "g");
        let full = BoolFunc::parse("h(a, b) = a+b").unwrap();
        assert_eq!(full.name(), "h");
        assert_eq!(bare, named);
        assert_eq!(named, full);
    }

    #[test]
    fn test_display() {
        let f = BoolFunc::parse("g(b, a) = a*b'").unwrap();
        assert_eq!(f.to_string(), "g(a, b) = a*~b");
    }

    #[test]
    fn test_minterms_maxterms() {
        let f = BoolFunc::parse("a+b").unwrap();
        assert_eq!(f.minterms(), &[1, 2, 3]);
        assert_eq!(f.maxterms(), &[0]);
    }

    #[test]
    fn test_substitute() {
        let f = BoolFunc::parse("a+b").unwrap();
        assert!(f.substitute("10").unwrap());
        assert!(!f.substitute("00").unwrap());
        assert!(matches!(f.substitute("100"), Err(Error::Domain { .. })));
        assert!(matches!(f.substitute("2x"), Err(Error::Domain { .. })));
    }

    #[test]
    fn test_equality_is_semantic() {
        let f = BoolFunc::parse("a+b").unwrap();
        let g = BoolFunc::parse("b+a").unwrap();
        let h = BoolFunc::parse("a*b").unwrap();
        assert_eq!(f, g);
        assert_ne!(f, h);
    }

    #[test]
    fn test_min_sop_textbook() {
        let f = BoolFunc::from_minterms(&["a", "b", "c", "d"], &[4, 8, 9, 10, 11, 12, 14, 15])
            .unwrap();
        let m = f.min_sop().unwrap();
        // Essential implicants -100, 10--, 1-1- in canonical order.
        assert_eq!(m.expression(), "b*~c*~d + a*~b + a*c");
        assert_eq!(m, f);
    }

    #[test]
    fn test_min_sop_constants() {
        let t = BoolFunc::parse("a+~a").unwrap();
        assert_eq!(t.min_sop().unwrap().expression(), "1");
        let z = BoolFunc::parse("a*~a").unwrap();
        assert_eq!(z.min_sop().unwrap().expression(), "0");
    }

    #[test]
    fn test_min_sop_idempotent() {
        let f = BoolFunc::parse("a*b + a*~b*c + ~a*c").unwrap();
        let once = f.min_sop().unwrap();
        let twice = once.min_sop().unwrap();
        assert_eq!(once.expression(), twice.expression());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_min_sop_cached() {
        let f = BoolFunc::parse("a*b + a*~b").unwrap();
        let first = f.min_sop().unwrap();
        let second = f.min_sop().unwrap();
        assert_eq!(first.expression(), second.expression());
        assert_eq!(first.expression(), "a");
    }

    #[test]
    fn test_min_sop_bounded() {
        let f = BoolFunc::from_minterms(&["a", "b", "c", "d"], &[4, 8, 9, 10, 11, 12, 14, 15])
            .unwrap();
        let err = f
            .min_sop_bounded(&ReduceLimits {
                max_patterns: Some(4),
                max_generations: None,
            })
            .unwrap_err();
        assert!(matches!(err, Error::ResourceExceeded { .. }));
        // A failed bounded run caches nothing; the unbounded run still works.
        assert_eq!(f.min_sop().unwrap().expression(), "b*~c*~d + a*~b + a*c");
    }

    #[test]
    fn test_min_pos_unsupported() {
        let f = BoolFunc::parse("a+b").unwrap();
        assert!(matches!(f.min_pos(), Err(Error::Unsupported { .. })));
    }

    #[test]
    fn test_min_expand() {
        let f = BoolFunc::parse("a*b").unwrap();
        assert_eq!(f.min_expand().expression(), "a*b");
        let g = BoolFunc::parse("a+b").unwrap();
        assert_eq!(g.min_expand().expression(), "~a*b + a*~b + a*b");
    }

    #[test]
    fn test_max_expand() {
        let f = BoolFunc::parse("a+b").unwrap();
        assert_eq!(f.max_expand().expression(), "(a + b)");
        let g = BoolFunc::parse("a*b").unwrap();
        assert_eq!(
            g.max_expand().expression(),
            "(a + b) * (a + ~b) * (~a + b)"
        );
    }

    #[test]
    fn test_combinators() {
        let a = BoolFunc::parse("x = a").unwrap();
        let b = BoolFunc::parse("y = b").unwrap();
        let both = a.and(&b).unwrap();
        assert_eq!(both.name(), "x_AND_y");
        assert_eq!(both, BoolFunc::parse("a*b").unwrap());
        assert_eq!(a.or(&b).unwrap(), BoolFunc::parse("a+b").unwrap());
        assert_eq!(a.xor(&b).unwrap(), BoolFunc::parse("a%b").unwrap());
        assert_eq!(a.nand(&b).unwrap(), BoolFunc::parse("a|b").unwrap());
        assert_eq!(a.nor(&b).unwrap(), BoolFunc::parse("a-b").unwrap());
        assert_eq!(a.complement().unwrap(), BoolFunc::parse("~a").unwrap());
    }

    #[test]
    fn test_from_minterms_bounds() {
        assert!(matches!(
            BoolFunc::from_minterms(&["a", "b"], &[4]),
            Err(Error::Domain { .. })
        ));
    }

    #[test]
    fn test_constant_functions() {
        let t = BoolFunc::parse("1").unwrap();
        assert!(t.variables().is_empty());
        assert!(t.substitute("").unwrap());
        assert_eq!(t.min_sop().unwrap().expression(), "1");
    }
}
