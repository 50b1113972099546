//! Validation for the event-driven text-edit step

use serde::{Deserialize, Serialize};

/// What counts as a real edit of the seeded headline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRules {
    /// Token that marks unfinished text
    pub placeholder: String,
    /// Texts the page ships with; committing one of these is not an edit
    pub seed_phrases: Vec<String>,
}

impl Default for EditRules {
    fn default() -> Self {
        Self {
            placeholder: "___".to_string(),
            seed_phrases: vec!["Hello ___".to_string(), "Hello".to_string()],
        }
    }
}

impl EditRules {
    /// Whether committed text completes the step. Surrounding whitespace is
    /// ignored.
    pub fn is_valid(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        if !self.placeholder.is_empty() && text.contains(&self.placeholder) {
            return false;
        }
        !self.seed_phrases.iter().any(|seed| seed == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_text_is_invalid() {
        let rules = EditRules::default();
        assert!(!rules.is_valid("Hello ___"));
        assert!(!rules.is_valid("Hello"));
    }

    #[test]
    fn test_empty_and_whitespace_invalid() {
        let rules = EditRules::default();
        assert!(!rules.is_valid(""));
        assert!(!rules.is_valid("   \n"));
    }

    #[test]
    fn test_placeholder_anywhere_is_invalid() {
        let rules = EditRules::default();
        assert!(!rules.is_valid("Goodbye ___ friend"));
    }

    #[test]
    fn test_real_edit_is_valid() {
        let rules = EditRules::default();
        assert!(rules.is_valid("Hello World"));
        assert!(rules.is_valid("  Hello World  "));
        assert!(rules.is_valid("Hi"));
    }

    #[test]
    fn test_custom_rules() {
        let rules = EditRules {
            placeholder: String::new(),
            seed_phrases: vec!["Welcome".to_string()],
        };
        assert!(rules.is_valid("___"));
        assert!(!rules.is_valid("Welcome"));
    }
}
