//! Intent matcher — maps free-text input to a canned reply.

use tracing::debug;

use crate::rules::RuleTable;

/// Resolves raw user input against the rule table.
///
/// Deterministic and total: every input resolves to either the first
/// matching rule's response or the fallback. Matching never mutates the
/// input and has no side effects.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    table: RuleTable,
}

impl IntentMatcher {
    /// Create a matcher over the given rule table.
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Create a matcher over the built-in topic table.
    pub fn with_default_rules() -> Self {
        Self::new(RuleTable::default_rules())
    }

    /// Resolve a reply for the raw input.
    ///
    /// Normalization (trim + case fold) is local to the lookup.
    pub fn respond(&self, raw: &str) -> &str {
        let normalized = raw.trim().to_lowercase();
        match self.table.first_match(&normalized) {
            Some(rule) => {
                debug!(topic = rule.topic, "Input matched topic rule");
                rule.response
            }
            None => {
                debug!("No rule matched, using fallback");
                self.table.fallback()
            }
        }
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let matcher = IntentMatcher::with_default_rules();
        let reply = matcher.respond("   WHAT IS PHISHING?   ");
        assert!(reply.contains("Phishing is when attackers"));
    }

    #[test]
    fn input_is_not_mutated() {
        let matcher = IntentMatcher::with_default_rules();
        let raw = "  What Is Phishing?  ";
        matcher.respond(raw);
        assert_eq!(raw, "  What Is Phishing?  ");
    }

    #[test]
    fn idempotent_for_same_input() {
        let matcher = IntentMatcher::with_default_rules();
        let first = matcher.respond("how can I create a strong password?");
        let second = matcher.respond("how can I create a strong password?");
        assert_eq!(first, second);
        assert!(first.contains("12 characters"));
    }

    #[test]
    fn unmatched_input_gets_fallback() {
        let matcher = IntentMatcher::with_default_rules();
        let reply = matcher.respond("asdkjhasd");
        assert_eq!(reply, RuleTable::default_rules().fallback());
    }

    #[test]
    fn empty_input_gets_fallback() {
        let matcher = IntentMatcher::with_default_rules();
        assert_eq!(matcher.respond(""), RuleTable::default_rules().fallback());
    }

    #[test]
    fn empty_table_always_falls_back() {
        let matcher = IntentMatcher::new(RuleTable::empty());
        assert_eq!(
            matcher.respond("what is phishing?"),
            RuleTable::empty().fallback()
        );
    }
}
