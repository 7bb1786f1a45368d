//! Sesión de resaltado
//!
//! La sesión posee el texto, las búsquedas y la instantánea tokenizada del
//! ciclo de bloqueo actual. Bloquear tokeniza; desbloquear descarta la
//! instantánea y permite editar. Las podas reconstruyen la instantánea.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::document::{Document, Span, Tokenizer};
use crate::error::{Error, Result};
use crate::export::{ExportOutcome, Exporter, NamePrompt};
use crate::highlight::{HighlightSummary, Highlighter};
use crate::render::{Format, Renderer};
use crate::search::Query;

/// Número máximo de búsquedas simultáneas
pub const MAX_QUERIES: usize = 8;

/// Unidad que se poda del documento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneUnit {
    /// Conserva solo las oraciones con alguna palabra resaltada
    Sentences,
    /// Conserva solo los párrafos con alguna palabra resaltada
    Paragraphs,
}

impl FromStr for PruneUnit {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentences" | "sentence" | "oraciones" => Ok(PruneUnit::Sentences),
            "paragraphs" | "paragraph" | "parrafos" | "párrafos" => Ok(PruneUnit::Paragraphs),
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

impl fmt::Display for PruneUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneUnit::Sentences => f.write_str("sentences"),
            PruneUnit::Paragraphs => f.write_str("paragraphs"),
        }
    }
}

/// Resultado de una poda
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: usize,
    pub summary: HighlightSummary,
}

#[derive(Debug, Default)]
pub struct Session {
    text: String,
    queries: Vec<Query>,
    document: Option<Document>,
    tokenizer: Tokenizer,
    highlighter: Highlighter,
}

impl Session {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_locked(&self) -> bool {
        self.document.is_some()
    }

    /// Instantánea del ciclo de bloqueo actual
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Reemplaza el texto; solo con el documento desbloqueado
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        if self.is_locked() {
            return Err(Error::DocumentLocked);
        }
        self.text = text.into();
        Ok(())
    }

    /// Bloquea el documento y lo tokeniza
    pub fn lock(&mut self) -> &Document {
        if self.document.is_none() {
            info!(bytes = self.text.len(), "documento bloqueado");
        }
        let tokenizer = self.tokenizer;
        let text = &self.text;
        self.document.get_or_insert_with(|| tokenizer.tokenize(text))
    }

    /// Desbloquea el documento; la instantánea y sus resaltados se descartan
    pub fn unlock(&mut self) {
        if self.document.take().is_some() {
            info!("documento desbloqueado");
        }
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Añade una búsqueda y devuelve su posición
    pub fn add_query(&mut self, query: Query) -> Result<usize> {
        if self.queries.len() >= MAX_QUERIES {
            return Err(Error::TooManyQueries { limit: MAX_QUERIES });
        }
        self.queries.push(query);
        Ok(self.queries.len() - 1)
    }

    pub fn remove_query(&mut self, index: usize) -> Result<Query> {
        if index >= self.queries.len() {
            return Err(Error::QueryNotFound(index));
        }
        Ok(self.queries.remove(index))
    }

    pub fn query_mut(&mut self, index: usize) -> Result<&mut Query> {
        self.queries.get_mut(index).ok_or(Error::QueryNotFound(index))
    }

    /// Ejecuta todas las búsquedas sobre la instantánea actual
    pub fn highlight(&mut self) -> Result<HighlightSummary> {
        let document = self.document.as_mut().ok_or(Error::DocumentUnlocked)?;
        Ok(self.highlighter.apply(document, &self.queries))
    }

    /// Quita todos los resaltados; las búsquedas se conservan
    pub fn clear_highlights(&mut self) {
        if let Some(document) = self.document.as_mut() {
            document.clear_highlights();
        }
    }

    pub fn summary(&self) -> Option<HighlightSummary> {
        self.document.as_ref().map(HighlightSummary::of)
    }

    /// Elimina del texto las oraciones o párrafos sin palabras resaltadas,
    /// retokeniza y vuelve a resaltar.
    pub fn prune(&mut self, unit: PruneUnit) -> Result<PruneReport> {
        let document = self.document.as_ref().ok_or(Error::DocumentUnlocked)?;

        let (spans, kept): (&[Span], BTreeSet<usize>) = match unit {
            PruneUnit::Sentences => (
                document.sentences(),
                document
                    .words()
                    .iter()
                    .filter(|w| w.is_highlighted())
                    .map(|w| w.sentence)
                    .collect(),
            ),
            PruneUnit::Paragraphs => (
                document.paragraphs(),
                document
                    .words()
                    .iter()
                    .filter(|w| w.is_highlighted())
                    .map(|w| w.paragraph)
                    .collect(),
            ),
        };

        let removals: Vec<Span> = spans
            .iter()
            .enumerate()
            .filter(|(id, _)| !kept.contains(id))
            .map(|(id, _)| Self::removal_span(&self.text, spans, id, unit))
            .collect();

        for span in removals.iter().rev() {
            self.text.replace_range(span.start..span.end, "");
        }
        info!(unit = %unit, removed = removals.len(), "documento podado");

        let mut document = self.tokenizer.tokenize(&self.text);
        let summary = self.highlighter.apply(&mut document, &self.queries);
        self.document = Some(document);

        Ok(PruneReport {
            removed: removals.len(),
            summary,
        })
    }

    /// Tramo a borrar: la unidad más el separador que la sigue. Un párrafo
    /// se borra hasta el inicio del siguiente (o hasta el final del texto).
    fn removal_span(text: &str, spans: &[Span], id: usize, unit: PruneUnit) -> Span {
        let span = spans[id];
        let end = match unit {
            PruneUnit::Sentences => {
                let rest = &text[span.end..];
                span.end + rest.len() - rest.trim_start_matches([' ', '\t']).len()
            }
            PruneUnit::Paragraphs => spans.get(id + 1).map_or(text.len(), |next| next.start),
        };
        Span::new(span.start, end)
    }

    /// Genera la salida; sin bloqueo se usa una instantánea sin resaltados
    pub fn render(&self, renderer: &Renderer, format: Format) -> Result<String> {
        match &self.document {
            Some(document) => renderer.render(&self.text, document, format),
            None => renderer.render(&self.text, &self.tokenizer.tokenize(&self.text), format),
        }
    }

    pub fn export(
        &self,
        exporter: &Exporter,
        format: Format,
        prompt: &mut dyn NamePrompt,
    ) -> Result<ExportOutcome> {
        match &self.document {
            Some(document) => exporter.export(&self.text, document, format, prompt),
            None => {
                let document = self.tokenizer.tokenize(&self.text);
                exporter.export(&self.text, &document, format, prompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Scope;

    #[test]
    fn test_lock_cycle() {
        let mut session = Session::new("one two");
        assert!(!session.is_locked());
        assert!(matches!(session.highlight(), Err(Error::DocumentUnlocked)));

        assert_eq!(session.lock().len(), 2);
        assert!(matches!(session.set_text("x"), Err(Error::DocumentLocked)));

        session.unlock();
        session.set_text("one two three").unwrap();
        assert_eq!(session.lock().len(), 3);
    }

    #[test]
    fn test_query_limit() {
        let mut session = Session::new("");
        for i in 0..MAX_QUERIES {
            assert_eq!(session.add_query(Query::new("x")).unwrap(), i);
        }
        assert!(matches!(
            session.add_query(Query::new("x")),
            Err(Error::TooManyQueries { limit: MAX_QUERIES })
        ));

        session.remove_query(0).unwrap();
        assert!(session.add_query(Query::new("y")).is_ok());
        assert!(matches!(session.remove_query(42), Err(Error::QueryNotFound(42))));
    }

    #[test]
    fn test_clear_highlights_keeps_queries() {
        let mut session = Session::new("alpha beta");
        session.add_query(Query::new("alpha")).unwrap();
        session.lock();
        assert_eq!(session.highlight().unwrap().highlighted_words, 1);

        session.clear_highlights();
        assert_eq!(session.summary().unwrap().highlighted_words, 0);
        assert_eq!(session.queries().len(), 1);
    }

    #[test]
    fn test_unlock_discards_highlights() {
        let mut session = Session::new("alpha beta");
        session.add_query(Query::new("alpha")).unwrap();
        session.lock();
        session.highlight().unwrap();

        session.unlock();
        assert!(session.summary().is_none());
        assert_eq!(session.lock().highlighted_count(), 0);
    }

    #[test]
    fn test_prune_sentences() {
        let mut session = Session::new("Keep this fox. Drop this one. Another fox here.");
        session.add_query(Query::new("fox")).unwrap();
        session.lock();
        session.highlight().unwrap();

        let report = session.prune(PruneUnit::Sentences).unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(session.text(), "Keep this fox. Another fox here.");
        assert_eq!(report.summary.highlighted_words, 2);
        assert_eq!(session.document().unwrap().sentences().len(), 2);
    }

    #[test]
    fn test_prune_paragraphs() {
        let mut session = Session::new("first fox\nsecond line\nthird fox\n");
        session
            .add_query(Query::new("fox").with_scope(Scope::Paragraph))
            .unwrap();
        session.lock();
        session.highlight().unwrap();

        let report = session.prune(PruneUnit::Paragraphs).unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(session.text(), "first fox\nthird fox\n");
        assert_eq!(report.summary.total_words, 4);
        assert_eq!(report.summary.highlighted_words, 2);
    }

    #[test]
    fn test_prune_paragraphs_removes_whole_gap() {
        let mut session = Session::new("a fox\n\nb\n\nc fox");
        session
            .add_query(Query::new("fox").with_scope(Scope::Paragraph))
            .unwrap();
        session.lock();
        session.highlight().unwrap();

        let report = session.prune(PruneUnit::Paragraphs).unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(session.text(), "a fox\n\nc fox");
        assert_eq!(session.document().unwrap().paragraphs().len(), 2);
    }

    #[test]
    fn test_prune_last_paragraph_to_end() {
        let mut session = Session::new("a fox\r\n\r\nb\r\n");
        session.add_query(Query::new("fox")).unwrap();
        session.lock();
        session.highlight().unwrap();

        session.prune(PruneUnit::Paragraphs).unwrap();

        assert_eq!(session.text(), "a fox\r\n\r\n");
    }

    #[test]
    fn test_prune_requires_lock() {
        let mut session = Session::new("a");
        assert!(matches!(
            session.prune(PruneUnit::Sentences),
            Err(Error::DocumentUnlocked)
        ));
    }

    #[test]
    fn test_render_unlocked_has_no_highlights() {
        let session = Session::new("alpha");
        let output = session.render(&Renderer::new("t"), Format::Html).unwrap();

        assert!(!output.contains("<span"));
    }
}
