//! Expression normalization: raw user syntax to canonical form.
//!
//! The engine accepts three input shapes:
//!
//! - bare expression: `a+b`
//! - name assignment: `f = a+b`
//! - fully qualified: `f(a,b) = a+b`
//!
//! Several operator aliases are accepted on input, but the canonical
//! output uses exactly one symbol per operator:
//!
//! | Operator | Canonical | Also accepted |
//! |----------|-----------|---------------|
//! | AND      | `*`       | `^`           |
//! | OR       | `+`       | `v`           |
//! | NOT      | `~`       | trailing `'`  |
//! | XOR      | `%`       |               |
//! | NAND     | `\|`      |               |
//! | NOR      | `-`       |               |
//!
//! Normalization rewrites the postfix `'` into prefix `~` (relocating it
//! over a whole bracket group when one precedes it), wraps every
//! XOR/NAND/NOR operand pair in explicit brackets so their precedence is
//! unambiguous, and collapses redundant double-bracket layers.

use std::collections::BTreeSet;

use log::debug;

use crate::error::{Error, Result};

/// Operator symbols that may not appear inside a variable name.
const RESERVED_SYMBOLS: &[char] = &['*', '^', '+', '%', '|', '-', '~', '\'', '(', ')', '[', ']', '{', '}', ',', '='];

/// Identifier tokens that act as operators or constants, and therefore
/// cannot name a variable.
const RESERVED_NAMES: &[&str] = &["v", "0", "1"];

/// A lexical token of the expression grammar.
///
/// The same token set covers both raw input (where aliases like `^` and
/// `'` are still present) and canonical text, so the evaluator can reuse
/// the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A variable name: a maximal alphanumeric/underscore run.
    Ident(String),
    /// The constant `0` or `1`.
    Const(bool),
    And,
    Or,
    Xor,
    Nand,
    Nor,
    /// Prefix NOT (`~`).
    Not,
    /// Postfix NOT (`'`); removed during normalization.
    PostfixNot,
    Open,
    Close,
}

impl Token {
    fn is_binary_op(&self) -> bool {
        matches!(self, Token::And | Token::Or | Token::Xor | Token::Nand | Token::Nor)
    }

    /// Can this token end an operand (so a binary operator may follow)?
    fn ends_operand(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::Const(_) | Token::Close)
    }

    /// Can this token start an operand (so a binary operator may precede)?
    fn starts_operand(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::Const(_) | Token::Open | Token::Not)
    }

    fn canonical(&self) -> &str {
        match self {
            Token::Ident(name) => name,
            Token::Const(false) => "0",
            Token::Const(true) => "1",
            Token::And => "*",
            Token::Or => "+",
            Token::Xor => "%",
            Token::Nand => "|",
            Token::Nor => "-",
            Token::Not => "~",
            Token::PostfixNot => "'",
            Token::Open => "(",
            Token::Close => ")",
        }
    }
}

/// The result of normalizing one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Function name (the default is supplied by the caller for bare
    /// expressions).
    pub name: String,
    /// Alphabetically sorted variable list. This ordering is the one
    /// every assignment bit-string in the system refers to.
    pub variables: Vec<String>,
    /// Canonical expression text over the fixed symbol set.
    pub expression: String,
}

/// Splits raw text into tokens.
///
/// `[`/`]` and `{`/`}` are accepted as bracket aliases. A standalone
/// alphanumeric run `v` is the OR operator; `0` and `1` are constants;
/// any other run is an identifier.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '(' | '[' | '{' => {
                tokens.push(Token::Open);
                i += 1;
            }
            ')' | ']' | '}' => {
                tokens.push(Token::Close);
                i += 1;
            }
            '*' | '^' => {
                tokens.push(Token::And);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Or);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Xor);
                i += 1;
            }
            '|' => {
                tokens.push(Token::Nand);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Nor);
                i += 1;
            }
            '~' => {
                tokens.push(Token::Not);
                i += 1;
            }
            '\'' => {
                tokens.push(Token::PostfixNot);
                i += 1;
            }
            c if c.is_ascii_alphanumeric() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let run: String = chars[start..i].iter().collect();
                match run.as_str() {
                    "v" => tokens.push(Token::Or),
                    "0" => tokens.push(Token::Const(false)),
                    "1" => tokens.push(Token::Const(true)),
                    _ => tokens.push(Token::Ident(run)),
                }
            }
            _ => {
                return Err(Error::syntax(format!("unexpected character `{}`", c)));
            }
        }
    }
    Ok(tokens)
}

/// Rewrites every postfix `'` into a prefix `~` in front of the term it
/// negates: either the single atom immediately before it, or the whole
/// bracket group when a `)` precedes it (found by balanced scanning
/// backward).
fn relocate_postfix(mut tokens: Vec<Token>) -> Result<Vec<Token>> {
    loop {
        let pos = match tokens.iter().position(|t| *t == Token::PostfixNot) {
            Some(pos) => pos,
            None => return Ok(tokens),
        };
        if pos == 0 {
            return Err(Error::syntax("`'` has no operand to negate"));
        }
        match tokens[pos - 1] {
            Token::Ident(_) | Token::Const(_) => {
                tokens.remove(pos);
                tokens.insert(pos - 1, Token::Not);
            }
            Token::Close => {
                let open = matching_open(&tokens, pos - 1)?;
                tokens.remove(pos);
                tokens.insert(open, Token::Not);
            }
            _ => {
                return Err(Error::syntax("`'` must follow an operand or a bracket group"));
            }
        }
    }
}

/// Index of the `(` matching the `)` at `close`.
fn matching_open(tokens: &[Token], close: usize) -> Result<usize> {
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match tokens[i] {
            Token::Close => depth += 1,
            Token::Open => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(Error::syntax("unbalanced brackets"))
}

/// Index of the `)` matching the `(` at `open`.
fn matching_close(tokens: &[Token], open: usize) -> Result<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Open => depth += 1,
            Token::Close => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(Error::syntax("unbalanced brackets"))
}

/// Checks bracket balance and operator adjacency.
///
/// After this passes, every binary operator has an operand on both sides
/// and every `~` has an operand to its right, so later passes may scan
/// without re-checking bounds.
fn validate(tokens: &[Token]) -> Result<()> {
    if tokens.is_empty() {
        return Err(Error::syntax("empty expression"));
    }

    let mut depth = 0i64;
    for token in tokens {
        match token {
            Token::Open => depth += 1,
            Token::Close => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::syntax("unbalanced brackets"));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::syntax("unbalanced brackets"));
    }

    for (i, token) in tokens.iter().enumerate() {
        let prev = if i > 0 { Some(&tokens[i - 1]) } else { None };
        let next = tokens.get(i + 1);
        match token {
            t @ (Token::And | Token::Or | Token::Xor | Token::Nand | Token::Nor) => {
                let left_ok = prev.map(|p| p.ends_operand()).unwrap_or(false);
                let right_ok = next.map(|n| n.starts_operand()).unwrap_or(false);
                if !left_ok || !right_ok {
                    return Err(Error::syntax(format!(
                        "operator `{}` has no adjacent operand",
                        t.canonical()
                    )));
                }
            }
            Token::Not => {
                if !next.map(|n| n.starts_operand()).unwrap_or(false) {
                    return Err(Error::syntax("`~` has no operand"));
                }
                if prev.map(|p| p.ends_operand()).unwrap_or(false) {
                    return Err(Error::syntax("`~` cannot follow an operand"));
                }
            }
            Token::Ident(_) | Token::Const(_) | Token::Open => {
                if prev.map(|p| p.ends_operand()).unwrap_or(false) {
                    return Err(Error::syntax("two operands with no operator between them"));
                }
                if *token == Token::Open && next == Some(&Token::Close) {
                    return Err(Error::syntax("empty bracket pair"));
                }
            }
            Token::Close => {}
            Token::PostfixNot => {
                return Err(Error::syntax("stray `'`"));
            }
        }
    }
    Ok(())
}

/// First token index of the operand ending just before `op`: an atom or a
/// balanced bracket group, including any prefix `~` chain.
fn left_operand_start(tokens: &[Token], op: usize) -> Result<usize> {
    let mut j = op - 1;
    if tokens[j] == Token::Close {
        j = matching_open(tokens, j)?;
    }
    while j > 0 && tokens[j - 1] == Token::Not {
        j -= 1;
    }
    Ok(j)
}

/// Last token index of the operand starting just after `op`.
fn right_operand_end(tokens: &[Token], op: usize) -> Result<usize> {
    let mut j = op + 1;
    while tokens[j] == Token::Not {
        j += 1;
    }
    if tokens[j] == Token::Open {
        j = matching_close(tokens, j)?;
    }
    Ok(j)
}

/// Wraps every XOR/NAND/NOR operand pair in explicit brackets, scanning
/// left-to-right so earlier insertions never corrupt later operator
/// positions. `a%b%c` becomes `((a%b)%c)`.
fn bracket_ambiguous_ops(tokens: &mut Vec<Token>) -> Result<()> {
    let mut i = 0;
    while i < tokens.len() {
        if matches!(tokens[i], Token::Xor | Token::Nand | Token::Nor) {
            let start = left_operand_start(tokens, i)?;
            let end = right_operand_end(tokens, i)?;
            // Insert the closer first: it does not shift indices <= end.
            tokens.insert(end + 1, Token::Close);
            tokens.insert(start, Token::Open);
            // The operator moved one slot right; resume after it.
            i += 2;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Collapses redundant nested bracket pairs: two bracket layers enclosing
/// an identical span become one. `(((a)))` becomes `(a)`.
fn collapse_brackets(tokens: &mut Vec<Token>) -> Result<()> {
    loop {
        let mut redundant = None;
        for i in 0..tokens.len().saturating_sub(1) {
            if tokens[i] == Token::Open && tokens[i + 1] == Token::Open {
                let outer = matching_close(tokens, i)?;
                let inner = matching_close(tokens, i + 1)?;
                if outer == inner + 1 {
                    redundant = Some((i, outer));
                    break;
                }
            }
        }
        match redundant {
            Some((open, close)) => {
                tokens.remove(close);
                tokens.remove(open);
            }
            None => return Ok(()),
        }
    }
}

fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.canonical()).collect()
}

fn infer_variables(tokens: &[Token]) -> BTreeSet<String> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Ident(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates one declared variable name.
fn check_declared(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::syntax("empty variable name in declaration"));
    }
    if name.chars().any(|c| RESERVED_SYMBOLS.contains(&c)) || RESERVED_NAMES.contains(&name) {
        return Err(Error::VariableConflict {
            name: name.to_string(),
        });
    }
    if !is_identifier(name) {
        return Err(Error::syntax(format!("invalid variable name `{}`", name)));
    }
    Ok(())
}

/// Splits the part before `=` into a function name and an optional
/// declared variable list.
fn parse_head(head: &str, default_name: &str) -> Result<(String, Option<Vec<String>>)> {
    let head = head.trim();
    if head.is_empty() {
        return Ok((default_name.to_string(), None));
    }
    if let Some(open) = head.find('(') {
        let close = head
            .rfind(')')
            .ok_or_else(|| Error::syntax("unbalanced brackets in declaration"))?;
        if close < open {
            return Err(Error::syntax("unbalanced brackets in declaration"));
        }
        let name = head[..open].trim();
        if !is_identifier(name) {
            return Err(Error::syntax(format!("invalid function name `{}`", name)));
        }
        let declared: Vec<String> = head[open + 1..close]
            .split(',')
            .map(|v| v.trim().to_string())
            .collect();
        for var in &declared {
            check_declared(var)?;
        }
        Ok((name.to_string(), Some(declared)))
    } else {
        if !is_identifier(head) {
            return Err(Error::syntax(format!("invalid function name `{}`", head)));
        }
        Ok((head.to_string(), None))
    }
}

/// Normalizes one raw input string.
///
/// Bare expressions get `default_name` as the function name. The returned
/// variable list is always alphabetically sorted, regardless of the order
/// in a declaration.
pub fn normalize(input: &str, default_name: &str) -> Result<Normalized> {
    let (head, body) = match input.find('=') {
        Some(eq) => (&input[..eq], &input[eq + 1..]),
        None => ("", input),
    };
    let (name, declared) = parse_head(head, default_name)?;

    let tokens = tokenize(body)?;
    let tokens = relocate_postfix(tokens)?;
    validate(&tokens)?;
    let mut tokens = tokens;
    bracket_ambiguous_ops(&mut tokens)?;
    collapse_brackets(&mut tokens)?;

    let inferred = infer_variables(&tokens);
    let variables: Vec<String> = match declared {
        Some(list) => {
            let set: BTreeSet<String> = list.into_iter().collect();
            for used in &inferred {
                if !set.contains(used) {
                    return Err(Error::DimensionMismatch { name: used.clone() });
                }
            }
            set.into_iter().collect()
        }
        None => inferred.into_iter().collect(),
    };

    let expression = render(&tokens);
    debug!("normalize: `{}` -> `{}` over {:?}", input, expression, variables);

    Ok(Normalized {
        name,
        variables,
        expression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> Normalized {
        normalize(input, "f").unwrap()
    }

    #[test]
    fn test_bare_expression() {
        let n = norm("a+b");
        assert_eq!(n.name, "f");
        assert_eq!(n.variables, vec!["a", "b"]);
        assert_eq!(n.expression, "a+b");
    }

    #[test]
    fn test_name_assignment() {
        let n = norm("g = a*b");
        assert_eq!(n.name, "g");
        assert_eq!(n.expression, "a*b");
    }

    #[test]
    fn test_fully_qualified() {
        let n = norm("f(b, a) = a+b");
        assert_eq!(n.name, "f");
        // Declared order is irrelevant: the exposed ordering is sorted.
        assert_eq!(n.variables, vec!["a", "b"]);
    }

    #[test]
    fn test_declared_superset_allowed() {
        let n = norm("f(a, b, c) = a+b");
        assert_eq!(n.variables, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(norm("a^b").expression, "a*b");
        assert_eq!(norm("a v b").expression, "a+b");
        assert_eq!(norm("a v b").variables, vec!["a", "b"]);
    }

    #[test]
    fn test_postfix_not_atom() {
        assert_eq!(norm("a'").expression, "~a");
        assert_eq!(norm("a'+b'").expression, "~a+~b");
    }

    #[test]
    fn test_postfix_not_bracket_group() {
        assert_eq!(norm("(a+b+c)'").expression, "~(a+b+c)");
        assert_eq!(norm("(a+b')'").expression, "~(a+~b)");
    }

    #[test]
    fn test_xor_bracketing() {
        assert_eq!(norm("a%b").expression, "(a%b)");
        assert_eq!(norm("a%b%c").expression, "((a%b)%c)");
    }

    #[test]
    fn test_nand_nor_bracketing() {
        assert_eq!(norm("a|b").expression, "(a|b)");
        assert_eq!(norm("a-b+c").expression, "(a-b)+c");
        assert_eq!(norm("~a|b").expression, "(~a|b)");
        assert_eq!(norm("(a+b)|c").expression, "((a+b)|c)");
    }

    #[test]
    fn test_collapse_redundant_brackets() {
        assert_eq!(norm("(((a)))").expression, "(a)");
        assert_eq!(norm("a + ((b + c)) + ((~c))").expression, "a+(b+c)+(~c)");
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert!(matches!(normalize("(a+b", "f"), Err(Error::Syntax { .. })));
        assert!(matches!(normalize("a+b)", "f"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_operator_without_operand() {
        assert!(matches!(normalize("a+", "f"), Err(Error::Syntax { .. })));
        assert!(matches!(normalize("*a", "f"), Err(Error::Syntax { .. })));
        assert!(matches!(normalize("a++b", "f"), Err(Error::Syntax { .. })));
        assert!(matches!(normalize("", "f"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_reserved_variable_name() {
        assert!(matches!(
            normalize("f(v, a) = v+a", "f"),
            Err(Error::VariableConflict { .. })
        ));
        assert!(matches!(
            normalize("f(1) = 1", "f"),
            Err(Error::VariableConflict { .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(matches!(
            normalize("f(a) = a+b", "f"),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_mixed_kitchen_sink() {
        // All aliases in one input, from the original grammar description.
        let n = norm("g(a, b, c, d) = (a' + ~b*(c v d))'");
        assert_eq!(n.variables, vec!["a", "b", "c", "d"]);
        assert_eq!(n.expression, "~(~a+~b*(c+d))");
    }

    #[test]
    fn test_constants() {
        assert_eq!(norm("1").expression, "1");
        assert!(norm("0+a").variables == vec!["a"]);
    }
}
