//! Rule specifications and normalization
//!
//! A field's rules can be written as a pipe-delimited line, or as an
//! ordered list mixing bare tokens, registry references and parameterized
//! rule objects. The normalizer expands any of those shapes into a flat
//! list of rule units for the evaluation engine.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::registry::RuleRegistry;
use crate::domain::rule::Rule;

/// Mapping from field name to its rule specification
pub type RuleSet = BTreeMap<String, RuleSpec>;

/// One atomic check attached to a field
#[derive(Clone)]
pub enum RuleUnit {
    /// Bare token, optionally with inline arguments after a colon
    /// (`"required"`, `"min:5"`, `"in:a,b,c"`)
    Token(String),
    /// Deferred reference to a registered rule type, instantiated with no
    /// arguments at resolution time
    Named(String),
    /// An instantiated parameterized rule object
    Rule(Arc<dyn Rule>),
}

impl RuleUnit {
    /// Build a token unit
    pub fn token(token: impl Into<String>) -> Self {
        RuleUnit::Token(token.into())
    }

    /// Build a registry-reference unit
    pub fn named(name: impl Into<String>) -> Self {
        RuleUnit::Named(name.into())
    }

    /// Build a rule-object unit
    pub fn rule(rule: impl Rule + 'static) -> Self {
        RuleUnit::Rule(Arc::new(rule))
    }

    /// The token name without inline arguments, when this unit is a token
    pub fn token_name(&self) -> Option<&str> {
        match self {
            RuleUnit::Token(token) => {
                Some(token.split_once(':').map(|(name, _)| name).unwrap_or(token))
            }
            _ => None,
        }
    }

    /// Whether this unit is the `required` marker
    pub fn is_required_marker(&self) -> bool {
        self.token_name() == Some("required")
    }

    /// Whether this unit is the `nullable` marker
    pub fn is_nullable_marker(&self) -> bool {
        self.token_name() == Some("nullable")
    }
}

impl fmt::Debug for RuleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleUnit::Token(token) => write!(f, "Token({token:?})"),
            RuleUnit::Named(name) => write!(f, "Named({name:?})"),
            RuleUnit::Rule(rule) => write!(f, "Rule({:?})", rule.kind()),
        }
    }
}

impl From<&str> for RuleUnit {
    fn from(token: &str) -> Self {
        RuleUnit::token(token)
    }
}

/// The rule specification attached to one field
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// Pipe-delimited token line, e.g. `"required|string|min:5"`
    Line(String),
    /// Ordered list of rule units
    List(Vec<RuleUnit>),
}

impl RuleSpec {
    /// Expand this specification into an ordered list of rule units.
    ///
    /// Pipe lines split into tokens; list elements pass through, except
    /// strings naming a registered rule type, which resolve to deferred
    /// references. Argument lists inside a token (such as `in:a,b`) cannot
    /// contain a literal `|` because the pipe split happens first.
    pub fn normalize(&self, registry: &RuleRegistry) -> Vec<RuleUnit> {
        match self {
            RuleSpec::Line(line) => line
                .split('|')
                .filter(|token| !token.is_empty())
                .map(|token| Self::resolve_token(token, registry))
                .collect(),
            RuleSpec::List(units) => units
                .iter()
                .map(|unit| match unit {
                    RuleUnit::Token(token) => Self::resolve_token(token, registry),
                    other => other.clone(),
                })
                .collect(),
        }
    }

    fn resolve_token(token: &str, registry: &RuleRegistry) -> RuleUnit {
        if registry.contains(token) {
            RuleUnit::named(token)
        } else {
            RuleUnit::token(token)
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(line: &str) -> Self {
        RuleSpec::Line(line.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(line: String) -> Self {
        RuleSpec::Line(line)
    }
}

impl From<Vec<RuleUnit>> for RuleSpec {
    fn from(units: Vec<RuleUnit>) -> Self {
        RuleSpec::List(units)
    }
}

impl<const N: usize> From<[RuleUnit; N]> for RuleSpec {
    fn from(units: [RuleUnit; N]) -> Self {
        RuleSpec::List(units.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::InRule;

    #[test]
    fn pipe_line_splits_into_tokens() {
        let registry = RuleRegistry::with_builtins();
        let spec = RuleSpec::from("required|string|min:5");
        let units = spec.normalize(&registry);

        assert_eq!(units.len(), 3);
        assert!(units[0].is_required_marker());
        assert_eq!(units[1].token_name(), Some("string"));
        assert_eq!(units[2].token_name(), Some("min"));
    }

    #[test]
    fn single_token_line_is_one_unit() {
        let registry = RuleRegistry::with_builtins();
        let units = RuleSpec::from("required").normalize(&registry);
        assert_eq!(units.len(), 1);
        assert!(units[0].is_required_marker());
    }

    #[test]
    fn registered_names_resolve_to_references() {
        let registry = RuleRegistry::with_builtins();
        let units = RuleSpec::from("required|BooleanRule").normalize(&registry);

        assert!(matches!(&units[1], RuleUnit::Named(name) if name == "BooleanRule"));
    }

    #[test]
    fn qualified_names_resolve_to_references() {
        let registry = RuleRegistry::with_builtins();
        let spec = RuleSpec::List(vec![
            RuleUnit::token("required"),
            RuleUnit::token("rules::string::BooleanRule"),
        ]);
        let units = spec.normalize(&registry);

        assert!(matches!(&units[1], RuleUnit::Named(_)));
    }

    #[test]
    fn list_keeps_rule_objects_and_order() {
        let registry = RuleRegistry::with_builtins();
        let spec = RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::token("string"),
            RuleUnit::rule(InRule::of(["staging", "production"])),
        ]);
        let units = spec.normalize(&registry);

        assert_eq!(units.len(), 3);
        assert!(matches!(&units[2], RuleUnit::Rule(rule) if rule.kind() == "in"));
    }

    #[test]
    fn required_marker_is_position_independent() {
        let registry = RuleRegistry::with_builtins();
        let units = RuleSpec::from("string|required").normalize(&registry);
        assert!(units.iter().any(RuleUnit::is_required_marker));
    }

    #[test]
    fn required_unless_is_not_a_required_marker() {
        let unit = RuleUnit::token("required_unless:DB_CONNECTION,sqlite");
        assert!(!unit.is_required_marker());
        assert_eq!(unit.token_name(), Some("required_unless"));
    }
}
