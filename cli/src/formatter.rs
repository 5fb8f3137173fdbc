use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use ruleform::{CompiledRule, RuleName, Value};
use std::collections::BTreeMap;

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_result(&self, rule: &str, value: &Value, raw: bool) -> String {
        if raw {
            return format!("{}\n", value);
        }

        let mut table = self.table(&["Rule", "Result"]);
        table.add_row(Row::from(vec![
            Cell::new(rule),
            Cell::new(value.to_string()),
        ]));
        format!("{}\n", table)
    }

    pub fn format_variables(&self, variables: &[String]) -> String {
        if variables.is_empty() {
            return "No fields referenced\n".to_string();
        }

        let mut table = self.table(&["Field"]);
        for variable in variables {
            table.add_row(Row::from(vec![variable]));
        }
        format!("{}\n", table)
    }

    pub fn format_compiled(&self, compiled: &CompiledRule) -> String {
        let variables = compiled.variables();
        let fields = if variables.is_empty() {
            "-".to_string()
        } else {
            variables.join(", ")
        };

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(Row::from(vec![Cell::new("Rule"), Cell::new(compiled.source())]));
        table.add_row(Row::from(vec![
            Cell::new("Prefix"),
            Cell::new(compiled.prefix_notation()),
        ]));
        table.add_row(Row::from(vec![Cell::new("Fields"), Cell::new(fields)]));
        format!("Rule is valid\n{}\n", table)
    }

    pub fn format_actions(&self, triggered: &BTreeMap<RuleName, Vec<String>>) -> String {
        if triggered.is_empty() {
            return "No actions registered\n".to_string();
        }

        let mut table = self.table(&["Input", "Actions"]);
        for (input, actions) in triggered {
            let actions = if actions.is_empty() {
                "-".to_string()
            } else {
                actions.join(", ")
            };
            table.add_row(Row::from(vec![input.to_string(), actions]));
        }
        format!("{}\n", table)
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(
            headers
                .iter()
                .map(|header| Cell::new(header).set_alignment(CellAlignment::Left))
                .collect::<Vec<_>>(),
        ));
        table
    }
}
