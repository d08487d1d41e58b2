//! Essential prime-implicant extraction and greedy covering.
//!
//! A minterm covered by exactly one prime implicant makes that implicant
//! essential. Minterms left uncovered after taking the essentials are
//! handled by a greedy pass: pick the candidate implicant covering the
//! most minterms, breaking ties toward the first-discovered one. This is
//! an approximation of exact set cover (Petrick's method), not a
//! guaranteed minimum.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::pattern::Pattern;
use crate::reduce::Registry;

/// Selects a covering subset of `primes` for `minterms`.
///
/// `primes` must be in discovery order; the greedy tie-break depends on
/// it. The result keeps selection order: essentials first (by ascending
/// minterm that forced them), then greedy picks.
pub fn select_cover(minterms: &[u64], primes: &[Pattern], registry: &Registry) -> Vec<Pattern> {
    // Chart: minterm -> indices of the primes covering it.
    let mut chart: BTreeMap<u64, Vec<usize>> = minterms.iter().map(|&m| (m, Vec::new())).collect();
    for (idx, prime) in primes.iter().enumerate() {
        for &m in &registry[prime] {
            if let Some(row) = chart.get_mut(&m) {
                row.push(idx);
            }
        }
    }

    let mut selected: Vec<usize> = Vec::new();
    let mut taken: HashSet<usize> = HashSet::new();
    let mut covered: HashSet<u64> = HashSet::new();

    // Essential pass: sole cover of any minterm.
    for (&m, row) in &chart {
        if row.len() == 1 {
            let idx = row[0];
            if taken.insert(idx) {
                debug!("cover: {} is essential (sole cover of {})", primes[idx], m);
                selected.push(idx);
                covered.extend(registry[&primes[idx]].iter().copied());
            }
        }
    }

    // Greedy pass over whatever the essentials left uncovered.
    for &m in minterms {
        if covered.contains(&m) {
            continue;
        }
        let row = &chart[&m];
        let mut best = row[0];
        for &idx in &row[1..] {
            // Strict comparison keeps the first-discovered implicant on
            // ties.
            if registry[&primes[idx]].len() > registry[&primes[best]].len() {
                best = idx;
            }
        }
        debug!(
            "cover: picking {} for uncovered minterm {} ({} covered)",
            primes[best],
            m,
            registry[&primes[best]].len()
        );
        taken.insert(best);
        selected.push(best);
        covered.extend(registry[&primes[best]].iter().copied());
    }

    selected.into_iter().map(|idx| primes[idx]).collect()
}
