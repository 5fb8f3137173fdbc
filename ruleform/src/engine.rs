use crate::ast::{variables_of, ExpressionPart, PrefixSequence, RuleName};
use crate::evaluator;
use crate::operators::{Operator, OperatorSet, OperatorTable};
use crate::parser::{segment, to_prefix};
use crate::value::{Record, Value};
use crate::{EvalError, ResourceLimits, RuleError, RuleResult};
use std::collections::HashMap;
use tracing::debug;

/// A rule as it sits in the cache: its prefix sequence plus the operator
/// definitions that were in effect when it was compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    source: String,
    sequence: PrefixSequence,
    operators: OperatorSet,
}

impl CompiledRule {
    /// Rule text the sequence was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sequence(&self) -> &[ExpressionPart] {
        &self.sequence
    }

    pub fn variables(&self) -> Vec<String> {
        variables_of(&self.sequence)
    }

    /// Prefix form, space separated, for display
    pub fn prefix_notation(&self) -> String {
        self.sequence
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The rule engine.
///
/// Owns an operator table and a cache of compiled rules. Each instance is
/// independent; nothing is shared between engines.
pub struct Engine {
    operators: OperatorTable,
    rules: HashMap<RuleName, CompiledRule>,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            operators: OperatorTable::new(),
            rules: HashMap::new(),
            limits: ResourceLimits::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Create an engine with a custom operator table
    pub fn with_operators(operators: OperatorTable) -> Self {
        Self {
            operators,
            ..Self::default()
        }
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Compile `rule` and cache it under `name`.
    ///
    /// Fails with `RuleAlreadyExists` when `name` is taken; use `update` to
    /// replace a rule.
    pub fn parse(&mut self, name: impl Into<RuleName>, rule: &str) -> RuleResult<()> {
        let name = name.into();
        if self.rules.contains_key(&name) {
            return Err(RuleError::RuleAlreadyExists(name));
        }
        self.update(name, rule)
    }

    /// Compile `rule` and cache it under `name`, replacing any previous rule.
    ///
    /// The compiled sequence is dry-run against a record that sets every
    /// referenced field to `"1"`. A rule that cannot reduce to one value is
    /// reported as `InvalidExpression` carrying the rule text and the cache is
    /// left as it was. Operator value errors (division by zero, overflow,
    /// non-numeric operands) are not structural and do not reject the rule.
    pub fn update(&mut self, name: impl Into<RuleName>, rule: &str) -> RuleResult<()> {
        let name = name.into();
        let compiled = self.compile(rule)?;

        if !self.rules.contains_key(&name) && self.rules.len() >= self.limits.max_rules {
            return Err(RuleError::ResourceLimitExceeded {
                limit_name: "max_rules".to_string(),
                limit_value: self.limits.max_rules.to_string(),
                actual_value: (self.rules.len() + 1).to_string(),
            });
        }

        debug!(rule = %name, prefix = %compiled.prefix_notation(), "rule compiled");
        self.rules.insert(name, compiled);
        Ok(())
    }

    /// Compile and dry-run `rule` without caching it.
    pub fn compile(&mut self, rule: &str) -> RuleResult<CompiledRule> {
        if rule.len() > self.limits.max_rule_bytes {
            return Err(RuleError::ResourceLimitExceeded {
                limit_name: "max_rule_bytes".to_string(),
                limit_value: self.limits.max_rule_bytes.to_string(),
                actual_value: rule.len().to_string(),
            });
        }

        let parts = segment(rule, &mut self.operators)?;
        let sequence = to_prefix(parts, &self.operators, rule, &self.limits)?;
        let compiled = CompiledRule {
            source: rule.to_string(),
            operators: self.operators.bindings_for(&sequence),
            sequence,
        };

        let dummy: Record = compiled
            .variables()
            .into_iter()
            .map(|field| (field, Value::text("1")))
            .collect();
        let outcome = match evaluator::evaluate(&compiled.sequence, &dummy, &compiled.operators) {
            // A value error such as `[x] / ([n] - 1)` with every field at 1
            // says nothing about the shape of the rule.
            Err(EvalError::Operator(cause)) => {
                debug!(rule, %cause, "dry run value error, checking shape only");
                check_shape(&compiled, &dummy)
            }
            other => other.map(|_| ()),
        };
        if let Err(cause) = outcome {
            debug!(rule, %cause, "dry run rejected rule");
            return Err(RuleError::invalid_expression(rule));
        }

        Ok(compiled)
    }

    /// Remove a cached rule. Removing an unknown name is a no-op.
    pub fn delete(&mut self, name: impl Into<RuleName>) {
        let name = name.into();
        if self.rules.remove(&name).is_some() {
            debug!(rule = %name, "rule deleted");
        }
    }

    /// Field names referenced by a cached rule, first occurrence first.
    pub fn variables(&self, name: impl Into<RuleName>) -> RuleResult<Vec<String>> {
        Ok(self.get_rule(name)?.variables())
    }

    /// Evaluate a cached rule against `record`.
    ///
    /// Evaluation failures are reported as `InvalidExpression` naming the rule.
    pub fn execute(&self, name: impl Into<RuleName>, record: &Record) -> RuleResult<Value> {
        let name = name.into();
        let rule = self.get_rule(&name)?;
        evaluator::evaluate(&rule.sequence, record, &rule.operators).map_err(|cause| {
            debug!(rule = %name, %cause, "evaluation failed");
            RuleError::invalid_expression(format!("with rule name '{}'", name))
        })
    }

    pub fn get_rule(&self, name: impl Into<RuleName>) -> RuleResult<&CompiledRule> {
        let name = name.into();
        self.rules.get(&name).ok_or(RuleError::RuleNotFound(name))
    }

    pub fn contains_rule(&self, name: impl Into<RuleName>) -> bool {
        self.rules.contains_key(&name.into())
    }

    pub fn list_rules(&self) -> Vec<RuleName> {
        let mut names: Vec<RuleName> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    /// Register or replace an operator. Cached rules keep the definitions they
    /// were compiled with.
    pub fn add_operator(&mut self, symbol: &str, operator: Operator) -> RuleResult<()> {
        self.operators.insert(symbol, operator)
    }

    pub fn delete_operator(&mut self, symbol: &str) {
        self.operators.remove(symbol);
    }

    pub fn clear_operators(&mut self) {
        self.operators.clear();
    }

    /// Move the definition of `current` to `new`; keep both when
    /// `keep_current` is set.
    pub fn change_operator_symbol(
        &mut self,
        current: &str,
        new: &str,
        keep_current: bool,
    ) -> RuleResult<()> {
        self.operators.rename(current, new, keep_current)
    }
}

/// Evaluate `compiled` with operators that never fail, so only structural
/// problems (missing operands or operators) surface.
fn check_shape(compiled: &CompiledRule, record: &Record) -> Result<(), EvalError> {
    let inert: OperatorSet = compiled
        .operators
        .keys()
        .map(|symbol| {
            let operator = Operator::new(0, |_: &Value, _: &Value| Ok(Value::Null));
            (symbol.clone(), operator)
        })
        .collect();
    evaluator::evaluate(&compiled.sequence, record, &inert).map(|_| ())
}
