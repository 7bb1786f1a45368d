//! Motor de búsqueda
//!
//! Resuelve cada búsqueda contra el índice del documento y combina las
//! búsquedas que comparten ámbito de oración o párrafo.

pub mod query;
pub mod scope;

use std::collections::BTreeSet;

use tracing::debug;

use crate::document::Document;

pub use query::{parse_keywords, MatchMode, Query, Scope};
pub use scope::ScopeResolver;

/// Resultado de una búsqueda: palabras encontradas y unidades que tocan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    words: BTreeSet<usize>,
    paragraphs: BTreeSet<usize>,
    sentences: BTreeSet<usize>,
}

impl SearchResult {
    fn from_words(document: &Document, words: BTreeSet<usize>) -> Self {
        let mut paragraphs = BTreeSet::new();
        let mut sentences = BTreeSet::new();
        for word in words.iter().filter_map(|&id| document.word(id)) {
            paragraphs.insert(word.paragraph);
            sentences.insert(word.sentence);
        }
        Self {
            words,
            paragraphs,
            sentences,
        }
    }

    /// Identificadores de palabra encontrados, en orden de documento
    pub fn words(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().copied()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.words.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn paragraphs(&self) -> &BTreeSet<usize> {
        &self.paragraphs
    }

    pub fn sentences(&self) -> &BTreeSet<usize> {
        &self.sentences
    }

    /// Unidades tocadas para un ámbito; `None` para todo el documento
    pub fn units(&self, scope: Scope) -> Option<&BTreeSet<usize>> {
        match scope {
            Scope::WholeDocument => None,
            Scope::Sentence => Some(&self.sentences),
            Scope::Paragraph => Some(&self.paragraphs),
        }
    }
}

/// Búsqueda de una consulta sobre un documento tokenizado
pub struct Search<'a> {
    document: &'a Document,
    query: &'a Query,
}

impl<'a> Search<'a> {
    pub fn new(document: &'a Document, query: &'a Query) -> Self {
        Self { document, query }
    }

    /// Ejecuta la búsqueda; sin palabras clave el resultado es vacío
    pub fn run(&self) -> SearchResult {
        let Some((first, rest)) = self.query.keywords.split_first() else {
            return SearchResult::default();
        };

        let mut candidates: BTreeSet<usize> = self.found(first).into_iter().collect();

        // Frase: avanzar palabra a palabra hasta la última palabra clave
        for keyword in rest {
            if candidates.is_empty() {
                break;
            }
            candidates = candidates
                .iter()
                .filter_map(|&id| self.document.next_word(id))
                .filter(|word| self.query.mode.matches(&word.text, keyword))
                .map(|word| word.index)
                .collect();
        }

        // Retroceder desde la última palabra para recoger la frase completa
        let mut matched = candidates.clone();
        let mut frontier = candidates;
        for _ in 0..rest.len() {
            frontier = frontier
                .iter()
                .filter_map(|&id| self.document.word_before(id))
                .map(|word| word.index)
                .collect();
            matched.extend(frontier.iter().copied());
        }

        let result = SearchResult::from_words(self.document, matched);
        debug!(
            keywords = ?self.query.keywords,
            scope = %self.query.scope,
            matches = result.len(),
            "búsqueda resuelta"
        );
        result
    }

    /// Todas las palabras cuyo texto satisface una palabra clave
    pub fn found(&self, keyword: &str) -> Vec<usize> {
        let mode = self.query.mode;
        if mode.exact && mode.case_sensitive {
            return self.document.occurrences(keyword).to_vec();
        }

        let mut ids: Vec<usize> = self
            .document
            .index_entries()
            .filter(|(text, _)| mode.matches(text, keyword))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }
}
