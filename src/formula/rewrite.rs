use super::reference::{Delta, parse_endpoint_at};

/// Functions that build references from strings at evaluation time. Static
/// rewriting of such formulas would silently corrupt them, so they are copied
/// verbatim instead.
const VOLATILE_INDIRECTION: [&str; 2] = ["INDIRECT", "ADDRESS"];

pub fn contains_volatile_indirection(formula: &str) -> bool {
    let upper = formula.to_ascii_uppercase();
    VOLATILE_INDIRECTION.iter().any(|name| upper.contains(name))
}

/// Rewrite a raw cell value. Values that are not formulas (no leading `=`)
/// pass through unchanged.
pub fn rewrite_value(raw: &str, delta: Delta) -> String {
    match raw.strip_prefix('=') {
        Some(body) => format!("={}", rewrite_formula_body(body, delta)),
        None => raw.to_string(),
    }
}

/// Rewrite every cell/range reference in a formula body (text after the
/// leading `=`, which is how the workbook stores formulas).
///
/// The scan is an explicit tokenizer: an inside-string-literal flag is
/// toggled on each unescaped double quote (`""` is an escaped quote), and
/// reference recognition only happens outside literals. References inside a
/// longer identifier (`LOG10(`) or followed by more token characters are not
/// matched. Range matches translate each endpoint independently.
pub fn rewrite_formula_body(body: &str, delta: Delta) -> String {
    if contains_volatile_indirection(body) {
        return body.to_string();
    }

    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            if in_string && chars.get(i + 1) == Some(&'"') {
                out.push_str("\"\"");
                i += 2;
                continue;
            }
            in_string = !in_string;
            out.push(c);
            i += 1;
            continue;
        }
        if in_string {
            out.push(c);
            i += 1;
            continue;
        }
        if let Some((rendered, next)) = match_reference(&chars, i, delta) {
            out.push_str(&rendered);
            i = next;
            continue;
        }
        out.push(c);
        i += 1;
    }

    out
}

/// Try to read a single reference or a `start:end` range at `start` and
/// render its translation.
fn match_reference(chars: &[char], start: usize, delta: Delta) -> Option<(String, usize)> {
    if start > 0 && is_token_char(chars[start - 1]) {
        return None;
    }

    let (first, after_first) = parse_endpoint_at(chars, start)?;

    if chars.get(after_first) == Some(&':') {
        if let Some((second, after_second)) = parse_endpoint_at(chars, after_first + 1) {
            if !followed_by_token_char(chars, after_second) {
                return Some((
                    format!("{}:{}", first.translate(delta), second.translate(delta)),
                    after_second,
                ));
            }
        }
    }

    if followed_by_token_char(chars, after_first) {
        return None;
    }
    Some((first.translate(delta).to_string(), after_first))
}

fn followed_by_token_char(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(|c| is_token_char(*c) || *c == '(')
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}
