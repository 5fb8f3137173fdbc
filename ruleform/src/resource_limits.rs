/// Resource limits for rule compilation and the rule cache
///
/// These limits protect embedders against runaway input from end users while
/// being generous enough for any hand-written rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum rule text size in bytes
    /// Real usage: ~100 bytes, Limit: 64KB
    pub max_rule_bytes: usize,

    /// Maximum parenthesis nesting depth
    /// Real usage: ~3 levels, Limit: 100 (30x+)
    pub max_nesting_depth: usize,

    /// Maximum number of rules cached by one engine
    pub max_rules: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_rule_bytes: 64 * 1024, // 64 KB
            max_nesting_depth: 100,
            max_rules: 100_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
