//! Rule trait
//!
//! The contract every parameterized rule object fulfills: a pure pass/fail
//! predicate over one field's value plus a templated error message.

use crate::domain::value::EnvValue;

/// Placeholder substituted with the field name when a message is rendered
pub const ATTRIBUTE_PLACEHOLDER: &str = ":attribute";

/// A single atomic validation check.
///
/// Implementations are stateless and safe to share across evaluations.
/// Messages may contain the `:attribute` placeholder, which the evaluation
/// engine replaces with the field name being validated.
pub trait Rule: Send + Sync {
    /// Determine if the validation rule passes
    fn passes(&self, field: &str, value: &EnvValue) -> bool;

    /// Get the validation error message template
    fn message(&self) -> String;

    /// Short rule kind used in `"FIELD.kind"` message override keys
    fn kind(&self) -> &'static str;
}

/// Render a message template for a concrete field
pub(crate) fn render_message(template: &str, field: &str) -> String {
    template.replace(ATTRIBUTE_PLACEHOLDER, field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_field_name() {
        assert_eq!(
            render_message("The :attribute must be a valid URL.", "APP_URL"),
            "The APP_URL must be a valid URL."
        );
    }

    #[test]
    fn render_is_identity_without_placeholder() {
        assert_eq!(render_message("X", "APP_KEY"), "X");
    }
}
