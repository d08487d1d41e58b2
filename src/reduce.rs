//! Iterative prime-implicant reduction (the Quine-McCluskey merge).
//!
//! Generation 0 holds the minterms as fully cared patterns, bucketed by
//! Hamming weight. Each generation compares every pattern in bucket `w`
//! against every pattern in bucket `w+1`; a pair differing in exactly one
//! position merges into a pattern with a `-` there, placed in the next
//! generation's bucket `w`. A pattern that participates in no merge is a
//! discovered prime implicant.
//!
//! Every produced pattern strictly increases its don't-care count, which
//! is bounded by the width, so the loop reaches a fixed point within at
//! most `width` generations. The worst-case pattern count is still
//! exponential (up to `3^n / n` prime implicants), so the reduction
//! accepts an optional bound and fails with
//! [`Error::ResourceExceeded`][crate::error::Error::ResourceExceeded]
//! instead of running away.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::debug;

use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::term::Buckets;

/// Maps each pattern to the set of *original* minterms it covers.
///
/// Entries are always fully resolved to leaves: a merged pattern's set is
/// the union of its parents' sets, never the parents themselves.
pub type Registry = HashMap<Pattern, BTreeSet<u64>>;

/// Bounds on the reduction, so a caller can abort a pathological input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceLimits {
    /// Maximum total number of distinct patterns across all generations.
    pub max_patterns: Option<usize>,
    /// Maximum number of merge generations.
    pub max_generations: Option<usize>,
}

/// The outcome of a reduction: prime implicants in discovery order, plus
/// the provenance registry.
#[derive(Debug, Clone)]
pub struct Reduction {
    pub primes: Vec<Pattern>,
    pub registry: Registry,
}

/// Runs the generation loop over weight-bucketed minterms.
///
/// `buckets` maps 1-bit count to minterm values (see
/// [`classify`][crate::term::classify]); `width` is the variable count.
/// Zero minterms yield an empty prime set (constant false).
pub fn reduce(buckets: &Buckets, width: usize, limits: &ReduceLimits) -> Result<Reduction> {
    let mut registry = Registry::new();
    let mut primes: Vec<Pattern> = Vec::new();

    // Generation 0: minterms as fully cared patterns.
    let mut current: BTreeMap<u32, Vec<Pattern>> = BTreeMap::new();
    let mut pattern_count = 0usize;
    for (&weight, terms) in buckets {
        let bucket: Vec<Pattern> = terms
            .iter()
            .map(|&m| {
                let p = Pattern::from_minterm(m, width);
                registry.insert(p, BTreeSet::from([m]));
                p
            })
            .collect();
        pattern_count += bucket.len();
        current.insert(weight, bucket);
    }
    check_patterns(pattern_count, limits)?;

    let mut generation = 0usize;
    while !current.is_empty() {
        if let Some(max) = limits.max_generations {
            if generation >= max {
                return Err(Error::resource(format!(
                    "merge did not settle within {} generations",
                    max
                )));
            }
        }

        let mut next: BTreeMap<u32, Vec<Pattern>> = BTreeMap::new();
        let mut produced: HashSet<Pattern> = HashSet::new();
        let mut merged: HashSet<Pattern> = HashSet::new();

        let weights: Vec<u32> = current.keys().copied().collect();
        for &w in &weights {
            let upper = match current.get(&(w + 1)) {
                Some(upper) => upper,
                None => continue,
            };
            for p in &current[&w] {
                for q in upper {
                    let child = match p.combine(q) {
                        Some(child) => child,
                        None => continue,
                    };
                    merged.insert(*p);
                    merged.insert(*q);

                    // Both parents are already resolved to leaves, so the
                    // child's entry is too. Duplicate merge paths produce
                    // the same set; the union is idempotent.
                    let covered: BTreeSet<u64> = registry[p]
                        .union(&registry[q])
                        .copied()
                        .collect();
                    registry.entry(child).or_default().extend(covered);

                    if produced.insert(child) {
                        next.entry(w).or_default().push(child);
                        pattern_count += 1;
                        check_patterns(pattern_count, limits)?;
                    }
                }
            }
        }

        // Anything that failed to merge is prime.
        for bucket in current.values() {
            for p in bucket {
                if !merged.contains(p) {
                    primes.push(*p);
                }
            }
        }

        debug!(
            "reduce: generation {}: {} merged patterns, {} primes so far",
            generation,
            produced.len(),
            primes.len()
        );

        current = next;
        generation += 1;
    }

    Ok(Reduction { primes, registry })
}

fn check_patterns(count: usize, limits: &ReduceLimits) -> Result<()> {
    if let Some(max) = limits.max_patterns {
        if count > max {
            return Err(Error::resource(format!(
                "pattern count exceeded the configured bound of {}",
                max
            )));
        }
    }
    Ok(())
}
