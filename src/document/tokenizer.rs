//! Tokenizador de documentos
//!
//! Divide el texto en palabras, oraciones y párrafos conservando los
//! desplazamientos (en bytes) sobre el texto original.

use std::collections::HashMap;

use tracing::debug;

use super::{Document, Span, Word};

/// Signos que cierran una oración
const SENTENCE_TERMINALS: [char; 3] = ['.', '?', '!'];

/// Separa el signo final (terminal o coma) de un token.
///
/// Solo se quita un signo, y nunca si el token consiste únicamente en ese
/// signo: así toda palabra conserva al menos un carácter.
pub fn strip_trailing_mark(token: &str) -> (&str, Option<char>) {
    let mut chars = token.chars();
    match chars.next_back() {
        Some(last)
            if (SENTENCE_TERMINALS.contains(&last) || last == ',') && !chars.as_str().is_empty() =>
        {
            (chars.as_str(), Some(last))
        }
        _ => (token, None),
    }
}

fn is_paragraph_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Tokenizador de texto
#[derive(Debug, Default, Clone, Copy)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokeniza el documento completo y construye una instantánea indexada
    pub fn tokenize(&self, text: &str) -> Document {
        let runs = Self::word_runs(text);
        let paragraphs = Self::paragraph_runs(text);
        let mut sentences: Vec<Span> = Vec::new();
        let mut words: Vec<Word> = Vec::with_capacity(runs.len());
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();

        let mut paragraph = 0usize;
        let mut sentence_start: Option<usize> = None;

        for (start, end) in runs {
            let (normalized, mark) = strip_trailing_mark(&text[start..end]);

            // Avanzar el puntero de párrafo hasta el que contiene la palabra
            while paragraph + 1 < paragraphs.len() && start >= paragraphs[paragraph].end {
                paragraph += 1;
            }

            let open = *sentence_start.get_or_insert(start);

            let id = words.len();
            let word = Word {
                text: normalized.to_string(),
                paragraph,
                sentence: sentences.len(),
                start,
                end: start + normalized.len(),
                index: id,
                punctuation: mark.is_some(),
                highlight: None,
            };
            index.entry(word.text.clone()).or_default().push(id);
            words.push(word);

            // "." suelto también cierra la oración
            let terminal = text[start..end]
                .chars()
                .next_back()
                .is_some_and(|c| SENTENCE_TERMINALS.contains(&c));
            if terminal {
                sentences.push(Span::new(open, end));
                sentence_start = None;
            }
        }

        // Cierre implícito al final del documento
        if let (Some(open), Some(last)) = (sentence_start, words.last()) {
            sentences.push(Span::new(open, last.full_end()));
        }

        debug!(
            words = words.len(),
            sentences = sentences.len(),
            paragraphs = paragraphs.len(),
            distinct = index.len(),
            "documento tokenizado"
        );

        Document {
            words,
            paragraphs,
            sentences,
            index,
            len: text.len(),
        }
    }

    /// Tramos máximos sin espacios en blanco
    fn word_runs(text: &str) -> Vec<(usize, usize)> {
        Self::runs(text, |ch| !ch.is_whitespace())
    }

    /// Tramos máximos sin saltos de línea (párrafos provisionales)
    fn paragraph_runs(text: &str) -> Vec<Span> {
        Self::runs(text, |ch| !is_paragraph_break(ch))
            .into_iter()
            .map(|(start, end)| Span::new(start, end))
            .collect()
    }

    fn runs(text: &str, keep: impl Fn(char) -> bool) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            if !keep(ch) {
                continue;
            }
            let mut end = start + ch.len_utf8();
            while let Some(&(_, next_ch)) = chars.peek() {
                if keep(next_ch) {
                    end += next_ch.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            runs.push((start, end));
        }

        runs
    }
}
