//! Per-sentence linguistic analysis
//!
//! Finds a (subject, verb, object) reading of a sentence using the
//! marker table: the first word matching a verb stem is the verb, the
//! nearest preceding content word is the subject, and everything after
//! the verb is the object. Deliberately best-effort: no parsing, no
//! morphology beyond the stem prefixes.

use zubrilka_domain::Sentence;

use crate::config::PipelineConfig;
use crate::rules::match_rule;
use crate::text::{fold_lower, strip_edge_punct};

/// Words skipped when scanning backwards for a subject
///
/// Prepositions, conjunctions, and particles; pronouns like `это` stay
/// out of this set on purpose, since they make serviceable subjects.
pub const STOP_WORDS: &[&str] = &[
    "и", "а", "но", "или", "же", "ли", "бы", "то", "не", "ни", "в", "во", "на", "с", "со", "к",
    "ко", "по", "за", "из", "изо", "у", "о", "об", "обо", "от", "до", "при", "для", "без", "над",
    "под", "про", "через", "между",
];

/// A heuristic (subject, verb, object) reading of one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTriple {
    /// Surface form of the subject word
    pub subject: String,

    /// Surface form of the matched verb word
    pub verb: String,

    /// Everything after the verb, trailing punctuation trimmed
    pub object: String,

    /// The sentence the triple was read from
    pub sentence: Sentence,
}

/// Extracts triples from eligible sentences
pub struct Analyzer {
    min_sentence_chars: usize,
    min_sentence_words: usize,
}

impl Analyzer {
    /// Create an analyzer with the thresholds in `config`
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            min_sentence_chars: config.min_sentence_chars,
            min_sentence_words: config.min_sentence_words,
        }
    }

    /// Whether a sentence is long enough and Cyrillic enough to analyze
    pub fn is_eligible(&self, sentence: &Sentence) -> bool {
        sentence.char_count() >= self.min_sentence_chars
            && sentence.word_count() >= self.min_sentence_words
            && has_cyrillic(&sentence.text)
    }

    /// Read a triple from a sentence; `None` when the sentence is
    /// ineligible, no marker matches, or subject/object are missing
    pub fn analyze(&self, sentence: &Sentence) -> Option<SentenceTriple> {
        if !self.is_eligible(sentence) {
            return None;
        }

        let words: Vec<&str> = sentence.text.split_whitespace().collect();

        let verb_index = words.iter().position(|word| {
            let folded = fold_lower(strip_edge_punct(word));
            !folded.is_empty() && match_rule(&folded).is_some()
        })?;

        let subject = words[..verb_index].iter().rev().find_map(|word| {
            let stripped = strip_edge_punct(word);
            let folded = fold_lower(stripped);
            if folded.is_empty() || STOP_WORDS.contains(&folded.as_str()) {
                None
            } else {
                Some(stripped.to_string())
            }
        })?;

        let object = words[verb_index + 1..].join(" ");
        let object = object
            .trim_end_matches(['.', '!', '?', ',', ';', ':'])
            .trim();
        if object.is_empty() {
            return None;
        }

        Some(SentenceTriple {
            subject,
            verb: strip_edge_punct(words[verb_index]).to_string(),
            object: object.to_string(),
            sentence: sentence.clone(),
        })
    }
}

fn has_cyrillic(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::new(&PipelineConfig::default())
    }

    fn sentence(text: &str) -> Sentence {
        Sentence::new(text)
    }

    #[test]
    fn test_reads_subject_verb_object() {
        let triple = analyzer()
            .analyze(&sentence("Нацисты стремились к территориальной экспансии."))
            .unwrap();

        assert_eq!(triple.subject, "Нацисты");
        assert_eq!(triple.verb, "стремились");
        assert_eq!(triple.object, "к территориальной экспансии");
    }

    #[test]
    fn test_pronoun_subject_is_kept() {
        let triple = analyzer().analyze(&sentence("Это привело к войне.")).unwrap();

        assert_eq!(triple.subject, "Это");
        assert_eq!(triple.verb, "привело");
        assert_eq!(triple.object, "к войне");
    }

    #[test]
    fn test_subject_skips_stop_words() {
        // "не" sits between subject and verb and must be skipped
        let triple = analyzer()
            .analyze(&sentence("Правительство же не поддержало восставших граждан."))
            .unwrap();

        assert_eq!(triple.subject, "Правительство");
        assert_eq!(triple.verb, "поддержало");
    }

    #[test]
    fn test_short_sentence_ineligible() {
        // 19 characters, under the 20-char gate
        assert!(analyzer().analyze(&sentence("Это вызвало войну..")).is_none());
    }

    #[test]
    fn test_non_cyrillic_ineligible() {
        assert!(analyzer()
            .analyze(&sentence("The revolution led to a long war."))
            .is_none());
    }

    #[test]
    fn test_no_marker_means_no_triple() {
        assert!(analyzer()
            .analyze(&sentence("Государство существовало много столетий подряд."))
            .is_none());
    }

    #[test]
    fn test_verb_first_word_has_no_subject() {
        // Marker with nothing before it: no subject, no triple
        assert!(analyzer()
            .analyze(&sentence("Привело ли это к настоящей войне?"))
            .is_none());
    }

    #[test]
    fn test_verb_last_word_has_no_object() {
        assert!(analyzer()
            .analyze(&sentence("Неожиданно и тихо война завершилась."))
            .is_none());
    }

    #[test]
    fn test_earliest_marker_wins() {
        let triple = analyzer()
            .analyze(&sentence("Кризис вызвал протесты и привел к отставке."))
            .unwrap();

        assert_eq!(triple.verb, "вызвал");
        assert_eq!(triple.object, "протесты и привел к отставке");
    }

    #[test]
    fn test_eligibility_boundary() {
        // Exactly 20 characters passes the gate
        let s = sentence("Это привело к войне.");
        assert_eq!(s.char_count(), 20);
        assert!(analyzer().is_eligible(&s));
    }
}
