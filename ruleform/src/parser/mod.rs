//! Rule text segmentation
//!
//! A rule string is cut into parts in three passes, most specific first:
//! single-quoted literals, then `[bracketed]` field names, then operators and
//! parentheses from the operator table. Whatever is left over is trimmed and
//! kept as a bare literal.

use crate::ast::ExpressionPart;
use crate::operators::OperatorTable;
use crate::RuleResult;
use regex::Regex;
use std::sync::LazyLock;

pub mod converter;

pub use converter::to_prefix;

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'((?:[^']|'')*)'").expect("quoted literal pattern is valid")
});

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("variable pattern is valid"));

/// A piece of input: either text between matches or one match.
enum Piece<'a> {
    Between(&'a str),
    /// Whole match and its first capture group
    Matched(&'a str, &'a str),
}

/// Split `text` by `pattern`, keeping both the gaps and the matches in order.
/// Empty gaps are skipped.
fn split_keeping<'a>(pattern: &Regex, text: &'a str) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            pieces.push(Piece::Between(&text[last..whole.start()]));
        }
        let inner = caps.get(1).map_or(whole.as_str(), |m| m.as_str());
        pieces.push(Piece::Matched(whole.as_str(), inner));
        last = whole.end();
    }
    if last < text.len() {
        pieces.push(Piece::Between(&text[last..]));
    }
    pieces
}

/// Cut `rule` into expression parts, left to right.
///
/// Rebuilds the operator matcher first if the table changed since it was last
/// used.
pub fn segment(rule: &str, operators: &mut OperatorTable) -> RuleResult<Vec<ExpressionPart>> {
    let matcher = operators.matcher()?.clone();
    let mut parts = Vec::new();

    for piece in split_keeping(&QUOTED, rule) {
        match piece {
            Piece::Matched(_, text) => parts.push(ExpressionPart::Text(text.replace("''", "'"))),
            Piece::Between(chunk) => {
                for var_piece in split_keeping(&VARIABLE, chunk) {
                    match var_piece {
                        Piece::Matched(_, name) => {
                            parts.push(ExpressionPart::Variable(name.to_string()))
                        }
                        Piece::Between(rest) => {
                            segment_operators(rest, &matcher, operators, &mut parts)
                        }
                    }
                }
            }
        }
    }

    Ok(parts)
}

fn segment_operators(
    chunk: &str,
    matcher: &Regex,
    operators: &OperatorTable,
    parts: &mut Vec<ExpressionPart>,
) {
    for piece in split_keeping(matcher, chunk) {
        let fragment = match piece {
            Piece::Matched(whole, _) => {
                if whole == "(" || whole == ")" || operators.contains(whole) {
                    parts.push(ExpressionPart::Operator(whole.to_string()));
                    continue;
                }
                whole
            }
            Piece::Between(rest) => rest,
        };
        let literal = fragment.trim();
        if !literal.is_empty() {
            parts.push(ExpressionPart::Other(literal.to_string()));
        }
    }
}
