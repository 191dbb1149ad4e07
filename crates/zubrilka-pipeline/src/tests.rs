//! Integration tests for the full generation pipeline

#[cfg(test)]
mod tests {
    use crate::{
        split_sentences, Analyzer, AssembleOutcome, CardAssembler, CardDraft, Chunker,
        PipelineConfig, QuestionValidator, Synthesizer, INTERROGATIVES,
    };
    use zubrilka_domain::PageText;

    /// Drive the whole pipeline over a set of pages, the way the job
    /// layer does but without cancellation or persistence.
    fn run_pipeline(pages: &[PageText], max_cards: usize) -> Vec<CardDraft> {
        let config = PipelineConfig::default();
        let chunker = Chunker::new(&config);
        let analyzer = Analyzer::new(&config);
        let synthesizer = Synthesizer::new();
        let validator = QuestionValidator::new(&config);

        let mut assembler =
            CardAssembler::new(&analyzer, &synthesizer, &validator, &config, max_cards);
        'pages: for chunk in chunker.chunks(pages) {
            for sentence in split_sentences(&chunk.text) {
                if assembler.offer(&sentence, chunk.page_index) == AssembleOutcome::Saturated {
                    break 'pages;
                }
            }
        }
        assembler.into_drafts()
    }

    fn single_page(text: &str) -> Vec<PageText> {
        vec![PageText::new(0, text.to_string())]
    }

    #[test]
    fn test_history_paragraph_yields_two_cards() {
        let pages = single_page(
            "Нацисты стремились к территориальной экспансии. Это привело к войне.",
        );
        let drafts = run_pipeline(&pages, 10);

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].question, "К чему стремились Нацисты?");
        assert_eq!(
            drafts[0].answer,
            "Нацисты стремились к территориальной экспансии."
        );
        assert_eq!(drafts[1].question, "К чему привело Это?");
        assert_eq!(drafts[1].answer, "Это привело к войне.");
    }

    #[test]
    fn test_markerless_text_yields_nothing() {
        let pages = single_page(
            "Погода в тот день была совершенно обычная для ранней осени. \
             Люди на улицах города занимались своими повседневными делами.",
        );
        assert!(run_pipeline(&pages, 10).is_empty());
    }

    #[test]
    fn test_cap_of_one_stops_after_first_card() {
        let pages = single_page(
            "Нацисты стремились к территориальной экспансии. Это привело к войне. \
             Союзники поддерживали повстанцев оружием и деньгами весь год.",
        );
        let drafts = run_pipeline(&pages, 1);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].question, "К чему стремились Нацисты?");
    }

    #[test]
    fn test_duplicate_sentences_collapse_to_one_card() {
        let pages = single_page(
            "Это привело к войне. Это привело к войне. Это привело к войне.",
        );
        let drafts = run_pipeline(&pages, 10);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].question, "К чему привело Это?");
    }

    #[test]
    fn test_boilerplate_paragraph_is_dropped() {
        // The marker sentence would generate a card, but its paragraph
        // carries a URL and never reaches the analyzer.
        let pages = single_page(
            "Документ конвертирован с сайта https://history.example.com автоматически. \
             Это привело к войне.\n\n\
             Союзники поддерживали повстанцев оружием и деньгами весь год.",
        );
        let drafts = run_pipeline(&pages, 10);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].question, "Кого поддерживали Союзники?");
    }

    #[test]
    fn test_cards_carry_their_page_index() {
        let pages = vec![
            PageText::new(0, "Нацисты стремились к территориальной экспансии и укреплению влияния.".to_string()),
            PageText::new(1, "Союзники поддерживали повстанцев оружием и деньгами весь год.".to_string()),
        ];
        let drafts = run_pipeline(&pages, 10);

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].page_index, 0);
        assert_eq!(drafts[1].page_index, 1);
    }

    #[test]
    fn test_rerun_produces_identical_drafts() {
        let pages = vec![
            PageText::new(0, "Нацисты стремились к территориальной экспансии. Это привело к войне.".to_string()),
            PageText::new(1, "Союзники поддерживали повстанцев оружием и деньгами весь год.".to_string()),
        ];
        let first = run_pipeline(&pages, 10);
        let second = run_pipeline(&pages, 10);

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_question_is_well_formed() {
        let pages = vec![
            PageText::new(0, "Нацисты стремились к территориальной экспансии. Это привело к войне. \
                              Союзники поддерживали повстанцев оружием и деньгами весь год.".to_string()),
            PageText::new(1, "Реформаторы провели масштабную перепись населения страны. \
                              Комитет возглавил подготовку новой конституции государства. \
                              Восстание вызвало жестокие репрессии со стороны властей.".to_string()),
            PageText::new(2, "Крестьяне участвовали в освоении новых земель за рекой. \
                              Инженеры завершили строительство первой железной дороги.".to_string()),
        ];
        let drafts = run_pipeline(&pages, 100);
        assert!(drafts.len() >= 6);

        for draft in &drafts {
            let question = &draft.question;
            assert!(question.ends_with('?'), "no terminal ?: {}", question);
            assert_eq!(question.matches('?').count(), 1, "extra ?: {}", question);

            let length = question.chars().count();
            assert!((12..=150).contains(&length), "bad length {}: {}", length, question);

            let first_word = crate::fold_lower(
                question.split_whitespace().next().unwrap_or(""),
            );
            assert!(
                INTERROGATIVES.contains(&first_word.as_str()),
                "bad opening word: {}",
                question
            );

            assert!(!draft.context.is_empty());
            assert!(draft.answer.starts_with(&draft.context));
        }
    }
}
