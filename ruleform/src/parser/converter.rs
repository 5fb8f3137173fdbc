//! Infix to prefix conversion
//!
//! Scans the parts from last to first with an operator stack. Because the scan
//! runs backwards a `)` opens a group and a `(` closes it. Operators of equal
//! priority stay stacked, which keeps chains like `a - b - c` grouped left to
//! right once the output is reversed.

use crate::ast::{ExpressionPart, PrefixSequence};
use crate::operators::OperatorTable;
use crate::{ResourceLimits, RuleError, RuleResult};

/// Convert segmented `parts` of `source` into a prefix sequence.
///
/// Fails with `InvalidExpression` naming `source` on unbalanced parentheses,
/// and with `ResourceLimitExceeded` when groups nest deeper than allowed.
pub fn to_prefix(
    parts: Vec<ExpressionPart>,
    operators: &OperatorTable,
    source: &str,
    limits: &ResourceLimits,
) -> RuleResult<PrefixSequence> {
    let mut output: PrefixSequence = Vec::with_capacity(parts.len());
    let mut stack: Vec<ExpressionPart> = Vec::new();
    let mut depth = 0usize;

    for part in parts.into_iter().rev() {
        match part.paren() {
            Some(false) => {
                depth += 1;
                if depth > limits.max_nesting_depth {
                    return Err(RuleError::ResourceLimitExceeded {
                        limit_name: "max_nesting_depth".to_string(),
                        limit_value: limits.max_nesting_depth.to_string(),
                        actual_value: depth.to_string(),
                    });
                }
                stack.push(part);
            }
            Some(true) => {
                loop {
                    match stack.pop() {
                        Some(top) if top.paren() == Some(false) => break,
                        Some(top) if top.paren().is_none() => output.push(top),
                        _ => return Err(RuleError::invalid_expression(source)),
                    }
                }
                depth -= 1;
            }
            None => match operator_priority(&part, operators) {
                Some(priority) => {
                    while let Some(top) = stack.last() {
                        let binds_tighter = match top {
                            ExpressionPart::Operator(stacked) if top.paren().is_none() => {
                                operators.priority(stacked) < priority
                            }
                            _ => false,
                        };
                        if !binds_tighter {
                            break;
                        }
                        if let Some(top) = stack.pop() {
                            output.push(top);
                        }
                    }
                    stack.push(part);
                }
                None => output.push(part),
            },
        }
    }

    if stack.iter().any(|part| part.paren().is_some()) {
        return Err(RuleError::invalid_expression(source));
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }
    output.reverse();
    Ok(output)
}

fn operator_priority(part: &ExpressionPart, operators: &OperatorTable) -> Option<i32> {
    match part {
        ExpressionPart::Operator(symbol) => Some(operators.priority(symbol)),
        _ => None,
    }
}
