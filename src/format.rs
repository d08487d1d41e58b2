//! Rendering implicant sets as canonical sum-of-products text.

use std::collections::HashSet;

use crate::pattern::Pattern;

/// Renders one implicant as a product term over `variables`.
///
/// Position `i` of the pattern corresponds to `variables[i]`: `1` keeps
/// the variable, `0` negates it, `-` drops it. An all-dash implicant
/// renders as the constant `1`.
pub fn render_product(pattern: &Pattern, variables: &[String]) -> String {
    let text = pattern.to_string();
    let mut term = String::new();
    for (i, c) in text.chars().enumerate() {
        match c {
            '-' => continue,
            _ => {
                if !term.is_empty() {
                    term.push('*');
                }
                if c == '0' {
                    term.push('~');
                }
                term.push_str(&variables[i]);
            }
        }
    }
    if term.is_empty() {
        term.push('1');
    }
    term
}

/// Renders an implicant set as a deduplicated, deterministically ordered
/// SOP expression.
///
/// Terms are sorted by ascending count of asserted literals, then
/// lexicographically by pattern text. An empty set is the constant `0`;
/// a set containing the all-dash implicant is the constant `1`.
pub fn format_sop(implicants: &[Pattern], variables: &[String]) -> String {
    if implicants.is_empty() {
        return "0".to_string();
    }
    if implicants.iter().any(Pattern::is_all_dash) {
        return "1".to_string();
    }

    let mut seen = HashSet::new();
    let mut unique: Vec<Pattern> = implicants
        .iter()
        .copied()
        .filter(|p| seen.insert(*p))
        .collect();
    unique.sort_by_key(|p| (p.ones(), p.to_string()));

    unique
        .iter()
        .map(|p| render_product(p, variables))
        .collect::<Vec<String>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn p(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_render_product() {
        let v = vars(&["a", "b", "c"]);
        assert_eq!(render_product(&p("001"), &v), "~a*~b*c");
        assert_eq!(render_product(&p("-1-"), &v), "b");
        assert_eq!(render_product(&p("1-0"), &v), "a*~c");
    }

    #[test]
    fn test_sop_from_textbook() {
        let v = vars(&["a", "b", "c"]);
        let out = format_sop(&[p("001"), p("-1-")], &v);
        assert_eq!(out, "~a*~b*c + b");
    }

    #[test]
    fn test_constant_cases() {
        let v = vars(&["a", "b", "c"]);
        assert_eq!(format_sop(&[], &v), "0");
        assert_eq!(format_sop(&[p("---")], &v), "1");
    }

    #[test]
    fn test_dedup_and_order() {
        let v = vars(&["a", "b", "c", "d"]);
        // Duplicates collapse; fewest asserted literals first, then
        // lexicographic pattern order.
        let out = format_sop(&[p("1-1-"), p("-100"), p("1-1-"), p("10--")], &v);
        assert_eq!(out, "b*~c*~d + a*~b + a*c");
    }
}
