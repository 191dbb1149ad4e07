//! Question synthesis from analyzed triples
//!
//! Fills the matched rule's template with the triple's surface forms,
//! falling back to the generic role question for templateless rules.
//! Raw template output always passes through the same post-processing,
//! so a card can never carry instruction fragments, control tokens, or
//! a missing question mark no matter what a template author writes.

use tracing::debug;

use crate::analyzer::SentenceTriple;
use crate::rules::{match_rule, GENERIC_TEMPLATE};
use crate::text::normalize_whitespace;

/// Instruction fragments scrubbed from template output
const INSTRUCTION_FRAGMENTS: &[&str] = &["generate question:", "вопрос:", "задание:"];

/// Sequence-model control tokens scrubbed from template output
const SPECIAL_TOKENS: &[&str] = &["<pad>", "</s>", "<s>", "<unk>", "<mask>"];

/// Builds questions from sentence triples
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    /// Create a synthesizer
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a question for a triple
    ///
    /// The rule lookup goes through the same ordered table the analyzer
    /// matched against. `None` means the sentence is passed over, which
    /// is a normal filtering outcome rather than an error.
    pub fn synthesize(&self, triple: &SentenceTriple) -> Option<String> {
        let template = match match_rule(&triple.verb).and_then(|rule| rule.template) {
            Some(template) => template,
            None => {
                // The generic question needs both ends of the triple.
                if triple.subject.is_empty() || triple.object.is_empty() {
                    debug!("no template and incomplete triple, skipping");
                    return None;
                }
                GENERIC_TEMPLATE
            }
        };
        post_process(&fill(template, triple))
    }
}

/// Fill the `{verb}`, `{subject}`, and `{object}` slots with surface forms
fn fill(template: &str, triple: &SentenceTriple) -> String {
    template
        .replace("{verb}", &triple.verb)
        .replace("{subject}", &triple.subject)
        .replace("{object}", &triple.object)
}

/// Clean raw template output into a well-formed question
///
/// Strips control tokens and instruction fragments, trims edge junk,
/// capitalizes the first letter, and guarantees a single terminal `?`.
/// `None` when nothing survives the cleaning.
fn post_process(raw: &str) -> Option<String> {
    let mut text = strip_special_tokens(raw);
    for fragment in INSTRUCTION_FRAGMENTS {
        text = remove_ignore_case(&text, fragment);
    }

    let text = normalize_whitespace(&text);
    let text = text.trim_start_matches(|c: char| !c.is_alphanumeric());
    let text = text.trim_end_matches(|c: char| !c.is_alphanumeric() && !matches!(c, '.' | '!' | '?'));
    let text = text.trim_end_matches(['.', ',', ';', ':', '!']).trim_end();
    if text.is_empty() {
        debug!("question empty after post-processing");
        return None;
    }

    let mut question = capitalize_first(text);
    if !question.ends_with('?') {
        question.push('?');
    }
    Some(question)
}

/// Drop control tokens, including numbered `<extra_id_N>` markers
fn strip_special_tokens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('>') {
            Some(close) if is_special_token(&tail[..=close]) => {
                rest = &tail[close + 1..];
            }
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_special_token(token: &str) -> bool {
    if SPECIAL_TOKENS.contains(&token) {
        return true;
    }
    token
        .strip_prefix("<extra_id_")
        .and_then(|rest| rest.strip_suffix('>'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Remove every occurrence of `pattern`, compared case-insensitively
fn remove_ignore_case(text: &str, pattern: &str) -> String {
    let needle: Vec<char> = pattern.chars().collect();
    if needle.is_empty() {
        return text.to_string();
    }
    let hay: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < hay.len() {
        let matched = i + needle.len() <= hay.len()
            && hay[i..i + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(h, n)| h.to_lowercase().eq(n.to_lowercase()));
        if matched {
            i += needle.len();
        } else {
            out.push(hay[i]);
            i += 1;
        }
    }
    out
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zubrilka_domain::Sentence;

    fn triple(subject: &str, verb: &str, object: &str) -> SentenceTriple {
        SentenceTriple {
            subject: subject.to_string(),
            verb: verb.to_string(),
            object: object.to_string(),
            sentence: Sentence::new(&format!("{} {} {}.", subject, verb, object)),
        }
    }

    #[test]
    fn test_templated_question_uses_surface_forms() {
        let synthesizer = Synthesizer::new();
        let question = synthesizer
            .synthesize(&triple("Нацисты", "стремились", "к территориальной экспансии"))
            .unwrap();
        assert_eq!(question, "К чему стремились Нацисты?");
    }

    #[test]
    fn test_inflection_is_preserved() {
        let synthesizer = Synthesizer::new();
        let question = synthesizer
            .synthesize(&triple("Это", "привело", "к войне"))
            .unwrap();
        assert_eq!(question, "К чему привело Это?");
    }

    #[test]
    fn test_templateless_rule_falls_back_to_generic() {
        // "являлся" matches a marker rule with no template of its own
        let synthesizer = Synthesizer::new();
        let question = synthesizer
            .synthesize(&triple("Он", "являлся", "основателем больницы"))
            .unwrap();
        assert_eq!(question, "Какова роль Он в основателем больницы?");
    }

    #[test]
    fn test_unmatched_verb_falls_back_to_generic() {
        let synthesizer = Synthesizer::new();
        let question = synthesizer
            .synthesize(&triple("Город", "рос", "вокруг крепости"))
            .unwrap();
        assert_eq!(question, "Какова роль Город в вокруг крепости?");
    }

    #[test]
    fn test_generic_requires_object() {
        let synthesizer = Synthesizer::new();
        assert!(synthesizer.synthesize(&triple("Город", "рос", "")).is_none());
    }

    #[test]
    fn test_post_process_strips_control_tokens() {
        let cleaned = post_process("<pad>Что вызвало кризис?</s><extra_id_0>").unwrap();
        assert_eq!(cleaned, "Что вызвало кризис?");
    }

    #[test]
    fn test_post_process_strips_instruction_fragments() {
        let cleaned = post_process("Generate question: что вызвало кризис?").unwrap();
        assert_eq!(cleaned, "Что вызвало кризис?");

        let cleaned = post_process("Вопрос: к чему привело это?").unwrap();
        assert_eq!(cleaned, "К чему привело это?");
    }

    #[test]
    fn test_post_process_keeps_real_angle_brackets() {
        // Only known control tokens are dropped
        let cleaned = post_process("Что меньше <5 процентов?").unwrap();
        assert_eq!(cleaned, "Что меньше <5 процентов?");
    }

    #[test]
    fn test_post_process_appends_question_mark() {
        assert_eq!(post_process("Что вызвало кризис").unwrap(), "Что вызвало кризис?");
        assert_eq!(post_process("Что вызвало кризис.").unwrap(), "Что вызвало кризис?");
        assert_eq!(post_process("Что вызвало кризис?!").unwrap(), "Что вызвало кризис?");
    }

    #[test]
    fn test_post_process_capitalizes_first_letter() {
        assert_eq!(post_process("что вызвало кризис?").unwrap(), "Что вызвало кризис?");
    }

    #[test]
    fn test_post_process_trims_edge_junk() {
        assert_eq!(post_process("-- Что вызвало кризис? --").unwrap(), "Что вызвало кризис?");
    }

    #[test]
    fn test_post_process_rejects_empty_residue() {
        assert!(post_process("<pad></s>").is_none());
        assert!(post_process("   ").is_none());
        assert!(post_process("...").is_none());
    }
}
