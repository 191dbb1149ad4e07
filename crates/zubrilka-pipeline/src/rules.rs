//! The verb-marker rule table
//!
//! One ordered table drives both halves of the pipeline: the analyzer
//! scans sentences for the first word matching any stem, and the
//! synthesizer turns the matched rule into a question. Keeping markers
//! and templates in a single table is what guarantees the two sides can
//! never disagree about which verbs are recognized.

use crate::text::fold_lower;

/// One entry of the marker table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbRule {
    /// Stem matched against the start of a folded lowercase word
    pub stem: &'static str,

    /// Question template with `{verb}` and `{subject}` slots; `None`
    /// falls back to the generic template
    pub template: Option<&'static str>,
}

/// Generic question used when a rule carries no template of its own
///
/// Takes `{subject}` and `{object}` slots.
pub const GENERIC_TEMPLATE: &str = "Какова роль {subject} в {object}?";

/// The fixed, ordered marker table; first matching entry wins
///
/// Stems target inflected past-tense forms and are chosen to avoid
/// colliding with common nouns (`создал`, not `созда`, which would also
/// match `создание`; `играл`, not `игра`).
pub const VERB_RULES: &[VerbRule] = &[
    VerbRule {
        stem: "привел",
        template: Some("К чему {verb} {subject}?"),
    },
    VerbRule {
        stem: "стремил",
        template: Some("К чему {verb} {subject}?"),
    },
    VerbRule {
        stem: "поддержива",
        template: Some("Кого {verb} {subject}?"),
    },
    VerbRule {
        stem: "поддержал",
        template: Some("Кого {verb} {subject}?"),
    },
    VerbRule {
        stem: "вызва",
        template: Some("Что {verb} {subject}?"),
    },
    VerbRule {
        stem: "создал",
        template: Some("Что {verb} {subject}?"),
    },
    VerbRule {
        stem: "играл",
        template: Some("Какую роль {verb} {subject}?"),
    },
    VerbRule {
        stem: "участвова",
        template: Some("В чём {verb} {subject}?"),
    },
    VerbRule {
        stem: "провел",
        template: Some("Что {verb} {subject}?"),
    },
    VerbRule {
        stem: "проводил",
        template: Some("Что {verb} {subject}?"),
    },
    VerbRule {
        stem: "основал",
        template: Some("Что {verb} {subject}?"),
    },
    VerbRule {
        stem: "возглав",
        template: Some("Что {verb} {subject}?"),
    },
    VerbRule {
        stem: "завершил",
        template: Some("Чем {verb} {subject}?"),
    },
    VerbRule { stem: "явля", template: None },
    VerbRule { stem: "счита", template: None },
];

/// Find the first rule whose stem prefixes the given word
///
/// The word must already be folded (`fold_lower`) and stripped of edge
/// punctuation; `match_rule` folds defensively so callers holding a
/// surface form get the same answer.
pub fn match_rule(word: &str) -> Option<&'static VerbRule> {
    let folded = fold_lower(word);
    VERB_RULES.iter().find(|rule| folded.starts_with(rule.stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflected_forms_match() {
        assert!(match_rule("привело").is_some());
        assert!(match_rule("привела").is_some());
        assert!(match_rule("привели").is_some());
        assert!(match_rule("стремились").is_some());
        assert!(match_rule("поддерживали").is_some());
        assert!(match_rule("вызвало").is_some());
        assert!(match_rule("участвовала").is_some());
        assert!(match_rule("завершилась").is_some());
        assert!(match_rule("являлся").is_some());
    }

    #[test]
    fn test_yo_folding_matches() {
        // Surface forms written with ё must match the е-folded stems
        assert!(match_rule("привёл").is_some());
        assert!(match_rule("Провёл").is_some());
    }

    #[test]
    fn test_noun_collisions_do_not_match() {
        assert!(match_rule("создание").is_none());
        assert!(match_rule("игра").is_none());
        assert!(match_rule("игры").is_none());
        assert!(match_rule("основа").is_none());
        assert!(match_rule("основание").is_none());
        assert!(match_rule("явление").is_none());
        assert!(match_rule("поддержка").is_none());
    }

    #[test]
    fn test_first_entry_wins() {
        // "привел" sits before "провел"; a word matching only one still
        // resolves to its own entry
        let rule = match_rule("провела").unwrap();
        assert_eq!(rule.stem, "провел");
        let rule = match_rule("привела").unwrap();
        assert_eq!(rule.stem, "привел");
    }

    #[test]
    fn test_templateless_entries_exist() {
        let generic: Vec<_> = VERB_RULES.iter().filter(|r| r.template.is_none()).collect();
        assert_eq!(generic.len(), 2);
    }

    #[test]
    fn test_unrelated_words_do_not_match() {
        assert!(match_rule("нацисты").is_none());
        assert!(match_rule("экспансии").is_none());
        assert!(match_rule("война").is_none());
    }
}
