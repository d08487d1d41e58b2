//! Exhaustive semantic-equivalence checks.
//!
//! For every Boolean function of 2, 3, and 4 variables, the minimized
//! SOP's truth table must match the original's. Comparison is by full
//! table equality, never by string equality.

use boolfn_rs::func::BoolFunc;

fn check_all_functions(variables: &[&str]) {
    let n = variables.len();
    let rows = 1u32 << n;
    for function in 0u64..(1u64 << rows) {
        let minterms: Vec<u64> = (0..rows as u64).filter(|m| (function >> m) & 1 == 1).collect();
        let f = BoolFunc::from_minterms(variables, &minterms).unwrap();
        let minimal = f.min_sop().unwrap();

        // Re-parse the minimized text over the same variables, so the
        // comparison exercises the parser and evaluator too.
        let reparsed = BoolFunc::parse(&format!(
            "g({}) = {}",
            variables.join(","),
            minimal.expression()
        ))
        .unwrap();
        assert_eq!(
            reparsed.truth_table(),
            f.truth_table(),
            "function {:#b} over {} variables: `{}` is not equivalent",
            function,
            n,
            minimal.expression()
        );
    }
}

#[test]
fn all_two_variable_functions() {
    check_all_functions(&["a", "b"]);
}

#[test]
fn all_three_variable_functions() {
    check_all_functions(&["a", "b", "c"]);
}

#[test]
fn all_four_variable_functions() {
    check_all_functions(&["a", "b", "c", "d"]);
}
