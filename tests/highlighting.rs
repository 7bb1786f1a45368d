//! Tests de integración del resaltador.
//!
//! Ejecutar solo estos tests:  cargo test --test highlighting

use resaltador::{
    Color, Document, ExportOutcome, Exporter, Format, MatchMode, NameResponse, PruneUnit, Query,
    Renderer, Scope, Session,
};

fn create_locked_session(text: &str, queries: Vec<Query>) -> Session {
    let mut session = Session::new(text);
    for query in queries {
        session.add_query(query).expect("Failed to add query");
    }
    session.lock();
    session
}

fn highlighted_words(document: &Document) -> Vec<(String, usize)> {
    document
        .words()
        .iter()
        .filter(|w| w.is_highlighted())
        .map(|w| (w.text.clone(), w.sentence))
        .collect()
}

#[test]
fn test_phrase_in_whole_document() {
    let mut session = create_locked_session(
        "The quick fox jumps. The lazy dog sleeps.",
        vec![Query::new("quick fox").with_mode(MatchMode::new(true, true))],
    );

    let summary = session.highlight().unwrap();

    assert_eq!(
        highlighted_words(session.document().unwrap()),
        vec![("quick".to_string(), 0), ("fox".to_string(), 0)]
    );
    assert_eq!(summary.total_words, 8);
    assert_eq!(summary.highlighted_words, 2);
}

#[test]
fn test_reversed_phrase_does_not_match() {
    let mut session = create_locked_session("fox quick", vec![Query::new("quick fox")]);

    let summary = session.highlight().unwrap();

    assert_eq!(summary.highlighted_words, 0);
    assert!(summary.notices().contains(&"no se encontraron coincidencias"));
}

#[test]
fn test_same_paragraph_search() {
    let mut session = create_locked_session(
        "Alpha beta.\n\nGamma beta.",
        vec![
            Query::new("alpha").with_scope(Scope::Paragraph),
            Query::new("beta").with_scope(Scope::Paragraph),
        ],
    );

    session.highlight().unwrap();
    let document = session.document().unwrap();

    let paragraphs: Vec<usize> = document
        .words()
        .iter()
        .filter(|w| w.is_highlighted())
        .map(|w| w.paragraph)
        .collect();
    assert_eq!(paragraphs, vec![0, 0]);
    assert_eq!(document.words()[3].text, "beta");
    assert!(!document.words()[3].is_highlighted());
}

#[test]
fn test_same_sentence_search_with_colors() {
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);
    let mut session = create_locked_session(
        "Cats chase mice. Dogs chase cats. Mice hide from dogs.",
        vec![
            Query::new("cats").with_scope(Scope::Sentence).with_color(red),
            Query::new("chase").with_scope(Scope::Sentence).with_color(blue),
        ],
    );

    session.highlight().unwrap();
    let document = session.document().unwrap();

    let colored: Vec<(&str, Option<Color>)> = document
        .words()
        .iter()
        .map(|w| (w.text.as_str(), w.highlight))
        .filter(|(_, c)| c.is_some())
        .collect();
    assert_eq!(
        colored,
        vec![
            ("Cats", Some(red)),
            ("chase", Some(blue)),
            ("chase", Some(blue)),
            ("cats", Some(red)),
        ]
    );
}

#[test]
fn test_paragraph_then_sentence_then_individual() {
    let para = Color::rgb(1, 1, 1);
    let sent = Color::rgb(2, 2, 2);
    let word = Color::rgb(3, 3, 3);
    let mut session = create_locked_session(
        "one two three",
        vec![
            Query::new("two").with_color(word),
            Query::new("two").with_scope(Scope::Sentence).with_color(sent),
            Query::new("two three").with_scope(Scope::Paragraph).with_color(para),
        ],
    );

    session.highlight().unwrap();
    let document = session.document().unwrap();

    assert_eq!(document.words()[1].highlight, Some(word));
    assert_eq!(document.words()[2].highlight, Some(para));
}

#[test]
fn test_clear_and_rerun_is_idempotent() {
    let mut session = create_locked_session(
        "Red fish. Blue fish.\nOne fish, two fish.",
        vec![
            Query::new("fish").with_scope(Scope::Paragraph),
            Query::new("two").with_scope(Scope::Paragraph),
            Query::new("blue fish"),
        ],
    );

    let first = session.highlight().unwrap();
    let before = highlighted_words(session.document().unwrap());
    session.clear_highlights();
    assert_eq!(session.summary().unwrap().highlighted_words, 0);
    let second = session.highlight().unwrap();

    assert_eq!(first, second);
    assert_eq!(before, highlighted_words(session.document().unwrap()));
}

#[test]
fn test_plain_export_is_identical_to_original() {
    let text = "Alpha & beta.\r\n\r\n<Gamma> beta,   delta!\n";
    let mut session = create_locked_session(text, vec![Query::new("beta")]);
    session.highlight().unwrap();

    let plain = session.render(&Renderer::new("t"), Format::Text).unwrap();
    assert_eq!(plain.as_bytes(), text.as_bytes());
}

#[test]
fn test_closing_marker_after_stripped_punctuation() {
    let mut session = create_locked_session("Stop, fox.", vec![Query::new("stop")]);
    session.highlight().unwrap();

    let html = session.render(&Renderer::new("t"), Format::Html).unwrap();
    assert!(html.contains("<span style='background-color:#ffff00'>Stop,</span> fox."));
}

#[test]
fn test_prune_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = create_locked_session(
        "Keep the fox.\nDrop this line.\nAnother fox.",
        vec![Query::new("fox").with_scope(Scope::Paragraph)],
    );
    session.highlight().unwrap();

    let report = session.prune(PruneUnit::Paragraphs).unwrap();
    assert_eq!(report.removed, 1);
    assert_eq!(session.text(), "Keep the fox.\nAnother fox.");

    let exporter = Exporter::new(dir.path(), Renderer::new("Pruned"));
    let mut prompt = || NameResponse::Named("pruned".to_string());
    let outcome = session
        .export(&exporter, Format::Html, &mut prompt)
        .unwrap();

    let ExportOutcome::Written(path) = outcome else {
        panic!("Debería exportar el documento");
    };
    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("<title>Pruned</title>"));
    assert!(html.contains("fox.</span><br /><br />\nAnother"));
}

#[test]
fn test_cancelled_export_keeps_highlights() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = create_locked_session("fox", vec![Query::new("fox")]);
    session.highlight().unwrap();

    let exporter = Exporter::new(dir.path(), Renderer::new("t"));
    let mut prompt = || NameResponse::Cancelled;
    let outcome = session.export(&exporter, Format::Text, &mut prompt).unwrap();

    assert_eq!(outcome, ExportOutcome::Aborted);
    assert_eq!(session.summary().unwrap().highlighted_words, 1);
}

#[test]
fn test_retokenize_after_edit() {
    let mut session = create_locked_session("old text", vec![Query::new("new")]);
    assert_eq!(session.highlight().unwrap().highlighted_words, 0);

    session.unlock();
    session.set_text("brand new text").unwrap();
    session.lock();

    assert_eq!(session.highlight().unwrap().highlighted_words, 1);
}
