//! # boolfn-rs: Boolean function minimization in Rust
//!
//! **`boolfn-rs`** parses free-form textual Boolean expressions, generates
//! their complete truth tables, and computes minimal sum-of-products (SOP)
//! forms via a Quine-McCluskey prime-implicant reduction.
//!
//! ## Input grammar
//!
//! Expressions come in three shapes: bare (`a+b`), named (`f = a+b`), or
//! fully qualified (`f(a,b) = a+b`). Operator aliases are accepted on
//! input and folded to one canonical symbol set: `*`/`^` AND, `+`/`v` OR,
//! `~` or trailing `'` NOT, `%` XOR, `|` NAND, `-` NOR. See
//! [`normalize`] for the details.
//!
//! ## Basic usage
//!
//! ```rust
//! use boolfn_rs::func::BoolFunc;
//!
//! // 1. Parse an expression (variables are inferred and sorted).
//! let f = BoolFunc::parse("f = a*b + a*~b").unwrap();
//! assert_eq!(f.variables(), &["a".to_string(), "b".to_string()]);
//!
//! // 2. Inspect the truth table.
//! assert_eq!(f.minterms(), &[2, 3]); // rows "10" and "11"
//! assert!(f.substitute("10").unwrap());
//!
//! // 3. Minimize.
//! let minimal = f.min_sop().unwrap();
//! assert_eq!(minimal.expression(), "a");
//!
//! // 4. Equality is semantic (truth-table), not syntactic.
//! assert_eq!(minimal, f);
//! ```
//!
//! ## Pipeline
//!
//! Raw text flows through the components leaf-first:
//!
//! - [`normalize`]: raw syntax to canonical form + ordered variable list.
//! - [`table`]: evaluation over all `2^n` assignments.
//! - [`term`]: minterm/maxterm classification, weight bucketing.
//! - [`reduce`]: iterative prime-implicant merging with provenance.
//! - [`cover`]: essential-implicant extraction and greedy covering.
//! - [`format`]: rendering the implicant set as canonical SOP text.
//! - [`func`]: the [`BoolFunc`][crate::func::BoolFunc] facade tying it
//!   together, with per-instance write-once caching.
//!
//! The whole pipeline is synchronous and shares no state across function
//! instances. The reduction is exponential in the worst case; it accepts
//! an optional bound ([`reduce::ReduceLimits`]) so callers can abort
//! pathological inputs, and the engine is scoped for interactive,
//! human-sized problems (up to [`table::MAX_VARIABLES`] variables).
//!
//! Product-of-sums minimization is a documented gap
//! ([`Error::Unsupported`][crate::error::Error::Unsupported]), not an
//! omission to fix silently.

pub mod cover;
pub mod error;
pub mod eval;
pub mod format;
pub mod func;
pub mod normalize;
pub mod pattern;
pub mod reduce;
pub mod table;
pub mod term;
