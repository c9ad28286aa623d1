//! Free-text vocabulary matching
//!
//! Conditions and medications arrive as free text from the source
//! record. Indicators match them against short controlled term lists.
//! The strategy lives behind a trait so substring matching can be
//! replaced (e.g. by a coded SNOMED lookup) without touching the rule
//! evaluator.

use smallvec::SmallVec;

/// Short inline list of vocabulary terms
pub type TermList = SmallVec<[String; 4]>;

/// Strategy for matching free-text clinical lists against a term list
pub trait VocabularyMatcher: Send + Sync {
    /// True when any entry in `free_text` mentions any of `terms`
    fn matches(&self, free_text: &[String], terms: &[String]) -> bool;
}

/// Case-insensitive substring containment, the default strategy
///
/// Mirrors how the upstream record systems store these lists: "Type 2
/// diabetes mellitus" matches the term "type 2 diabetes". Known to be
/// fragile for short terms that embed in longer words.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl SubstringMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl VocabularyMatcher for SubstringMatcher {
    fn matches(&self, free_text: &[String], terms: &[String]) -> bool {
        free_text.iter().any(|entry| {
            let entry = entry.to_lowercase();
            terms.iter().any(|term| entry.contains(&term.to_lowercase()))
        })
    }
}

/// Build a term list from string literals
pub fn terms<const N: usize>(values: [&str; N]) -> TermList {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_text(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let matcher = SubstringMatcher::new();
        let conditions = free_text(&["Essential HYPERTENSION", "Asthma"]);
        assert!(matcher.matches(&conditions, &terms(["hypertension"])));
        assert!(matcher.matches(&conditions, &terms(["asthma", "copd"])));
        assert!(!matcher.matches(&conditions, &terms(["diabetes"])));
    }

    #[test]
    fn test_empty_inputs_never_match() {
        let matcher = SubstringMatcher::new();
        assert!(!matcher.matches(&[], &terms(["hypertension"])));
        assert!(!matcher.matches(&free_text(&["Hypertension"]), &[]));
    }

    #[test]
    fn test_term_embedded_in_entry() {
        let matcher = SubstringMatcher::new();
        let meds = free_text(&["Apixaban 5mg twice daily"]);
        assert!(matcher.matches(&meds, &terms(["apixaban"])));
    }
}
