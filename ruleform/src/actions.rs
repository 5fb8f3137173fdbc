//! Action rules for inputs
//!
//! Attaches labelled actions (`show`, `hide`, `require`, ...) to an input,
//! each guarded by one rule. Rules are cached in a private engine under
//! synthetic numeric ids, so any number of actions can share an input and no
//! id ever collides with a caller's rule name.

use crate::ast::RuleName;
use crate::engine::Engine;
use crate::value::{Record, Value};
use crate::{RuleError, RuleResult};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone)]
struct ActionRule {
    action: String,
    rule_id: RuleName,
}

#[derive(Default)]
pub struct ActionRules {
    engine: Engine,
    inputs: HashMap<RuleName, Vec<ActionRule>>,
    next_id: i64,
}

impl ActionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `engine` (and its operator table) for the action rules. Rules
    /// already cached in it are left alone; synthetic ids skip over them.
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Register `action` on `input`, triggered when `rule` evaluates truthy.
    pub fn add(&mut self, input: impl Into<RuleName>, action: &str, rule: &str) -> RuleResult<()> {
        let input = input.into();
        if self.find(&input, action).is_some() {
            return Err(RuleError::ActionAlreadyRegistered {
                input,
                action: action.to_string(),
            });
        }

        let rule_id = self.fresh_id();
        self.engine.parse(&rule_id, rule)?;
        self.next_id += 1;

        debug!(%input, action, %rule_id, "action registered");
        self.inputs.entry(input).or_default().push(ActionRule {
            action: action.to_string(),
            rule_id,
        });
        Ok(())
    }

    /// Replace the rule guarding an existing action.
    pub fn update(
        &mut self,
        input: impl Into<RuleName>,
        action: &str,
        rule: &str,
    ) -> RuleResult<()> {
        let input = input.into();
        let actions = self
            .inputs
            .get(&input)
            .ok_or_else(|| RuleError::InputNotRegistered(input.clone()))?;
        let rule_id = actions
            .iter()
            .find(|entry| entry.action == action)
            .map(|entry| entry.rule_id.clone())
            .ok_or_else(|| RuleError::ActionNotRegistered {
                input: input.clone(),
                action: action.to_string(),
            })?;
        self.engine.update(rule_id, rule)
    }

    /// Remove an action and its rule. Unknown pairs are ignored.
    pub fn delete(&mut self, input: impl Into<RuleName>, action: &str) {
        let input = input.into();
        let Some(actions) = self.inputs.get_mut(&input) else {
            return;
        };
        let Some(index) = actions.iter().position(|entry| entry.action == action) else {
            return;
        };

        let removed = actions.remove(index);
        self.engine.delete(removed.rule_id);
        if actions.is_empty() {
            self.inputs.remove(&input);
        }
        debug!(%input, action, "action deleted");
    }

    /// Actions of `input` whose rules hold for `record`, in registration order.
    /// An unknown input has no actions.
    ///
    /// A rule that fails while one of its fields is missing or null does not
    /// trigger. Any other failure is reported as `InvalidExpression` naming
    /// the action and input.
    pub fn evaluate(&self, input: impl Into<RuleName>, record: &Record) -> RuleResult<Vec<String>> {
        let input = input.into();
        let mut triggered = Vec::new();
        if let Some(actions) = self.inputs.get(&input) {
            for entry in actions {
                if self.holds(&input, entry, record)? {
                    triggered.push(entry.action.clone());
                }
            }
        }
        Ok(triggered)
    }

    /// Triggered actions for every registered input.
    pub fn evaluate_all(&self, record: &Record) -> RuleResult<BTreeMap<RuleName, Vec<String>>> {
        let mut results = BTreeMap::new();
        for input in self.inputs.keys() {
            results.insert(input.clone(), self.evaluate(input, record)?);
        }
        Ok(results)
    }

    /// Fields referenced by the rule guarding `action` on `input`.
    pub fn variables(&self, input: impl Into<RuleName>, action: &str) -> RuleResult<Vec<String>> {
        let input = input.into();
        match self.find(&input, action) {
            Some(entry) => self.engine.variables(&entry.rule_id),
            None if self.inputs.contains_key(&input) => Err(RuleError::ActionNotRegistered {
                input,
                action: action.to_string(),
            }),
            None => Err(RuleError::InputNotRegistered(input)),
        }
    }

    /// Registered action labels of `input`, in registration order.
    pub fn actions(&self, input: impl Into<RuleName>) -> Vec<String> {
        self.inputs
            .get(&input.into())
            .map(|actions| actions.iter().map(|entry| entry.action.clone()).collect())
            .unwrap_or_default()
    }

    pub fn inputs(&self) -> Vec<RuleName> {
        let mut inputs: Vec<RuleName> = self.inputs.keys().cloned().collect();
        inputs.sort();
        inputs
    }

    fn holds(&self, input: &RuleName, entry: &ActionRule, record: &Record) -> RuleResult<bool> {
        match self.engine.execute(&entry.rule_id, record) {
            Ok(value) => Ok(value.is_truthy()),
            Err(RuleError::InvalidExpression { .. }) => {
                let rule = self.engine.get_rule(&entry.rule_id)?;
                let empty_field = rule
                    .variables()
                    .iter()
                    .any(|field| record.get(field).map_or(true, Value::is_null));
                if empty_field {
                    debug!(%input, action = %entry.action, "rule skipped on empty field");
                    return Ok(false);
                }
                Err(RuleError::invalid_expression(format!(
                    "for action '{}' of input {}",
                    entry.action, input
                )))
            }
            Err(other) => Err(other),
        }
    }

    /// Next synthetic id not already cached in the engine.
    fn fresh_id(&mut self) -> RuleName {
        while self.engine.contains_rule(RuleName::Id(self.next_id)) {
            self.next_id += 1;
        }
        RuleName::Id(self.next_id)
    }

    fn find(&self, input: &RuleName, action: &str) -> Option<&ActionRule> {
        self.inputs
            .get(input)
            .and_then(|actions| actions.iter().find(|entry| entry.action == action))
    }
}
