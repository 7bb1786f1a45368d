//! Propiedades del tokenizador y de la resolución de ámbito.

use proptest::prelude::*;

use resaltador::{Document, Format, Query, Renderer, Scope, ScopeResolver, Search, Tokenizer};

/// Textos con palabras, signos finales, espacios y saltos de línea
fn document_text() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[a-zA-Zñé]{1,6}",
        "[a-z]{1,5}[.,?!]",
        Just(".".to_string()),
        Just("<&>".to_string()),
    ];
    let separator = prop_oneof![
        Just(" ".to_string()),
        Just("  ".to_string()),
        Just("\n".to_string()),
        Just("\n\n".to_string()),
        Just("\r\n".to_string()),
        Just("\t".to_string()),
    ];
    prop::collection::vec((token, separator), 0..40).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(token, separator)| token + &separator)
            .collect()
    })
}

proptest! {
    #[test]
    fn tokenizing_is_deterministic(text in document_text()) {
        let tokenizer = Tokenizer::new();
        let first = tokenizer.tokenize(&text);
        let second = tokenizer.tokenize(&text);
        prop_assert_eq!(first.words(), second.words());
        prop_assert_eq!(first.sentences(), second.sentences());
        prop_assert_eq!(first.paragraphs(), second.paragraphs());
    }

    #[test]
    fn word_offsets_are_in_bounds(text in document_text()) {
        let document = Document::new(&text);
        for word in document.words() {
            prop_assert!(word.start < word.end);
            prop_assert!(word.full_end() <= text.len());
            prop_assert_eq!(&text[word.start..word.end], word.text.as_str());
        }
    }

    #[test]
    fn words_are_ordered(text in document_text()) {
        let document = Document::new(&text);
        for (i, pair) in document.words().windows(2).enumerate() {
            prop_assert!(pair[0].full_end() < pair[1].start);
            prop_assert_eq!(pair[0].index, i);
        }
    }

    #[test]
    fn sentences_and_paragraphs_do_not_overlap(text in document_text()) {
        let document = Document::new(&text);
        for pair in document.sentences().windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for pair in document.paragraphs().windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for word in document.words() {
            let sentence = document.sentences()[word.sentence];
            let paragraph = document.paragraphs()[word.paragraph];
            prop_assert!(sentence.start <= word.start && word.full_end() <= sentence.end);
            prop_assert!(paragraph.start <= word.start && word.full_end() <= paragraph.end);
        }
    }

    #[test]
    fn navigation_is_symmetric(text in document_text()) {
        let document = Document::new(&text);
        for word in document.words() {
            if let Some(before) = document.word_before(word.index) {
                let after = document.next_word(before.index).map(|w| w.index);
                prop_assert_eq!(after, Some(word.index));
            }
        }
    }

    #[test]
    fn intersection_ignores_evaluation_order(
        text in document_text(),
        a in "[a-e]",
        b in "[a-e]",
        c in "[a-e]",
    ) {
        let document = Document::new(&text);
        let results: Vec<_> = [a, b, c]
            .iter()
            .map(|k| Search::new(&document, &Query::new(k).with_scope(Scope::Sentence)).run())
            .collect();
        let resolver = ScopeResolver::new(Scope::Sentence);

        let forward = resolver.resolve([&results[0], &results[1], &results[2]]);
        prop_assert_eq!(&forward, &resolver.resolve([&results[2], &results[0], &results[1]]));
        prop_assert_eq!(&forward, &resolver.resolve([&results[1], &results[2], &results[0]]));
    }

    #[test]
    fn plain_render_is_identity(text in document_text()) {
        let document = Document::new(&text);
        let output = Renderer::new("t").render(&text, &document, Format::Text).unwrap();
        prop_assert_eq!(output, text);
    }
}
