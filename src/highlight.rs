//! Asignación de resaltados
//!
//! Orden fijo de escritura: grupo de párrafo, grupo de oración y después las
//! búsquedas individuales, cada grupo en el orden de las búsquedas. Si dos
//! búsquedas tocan la misma palabra gana la última.

use std::fmt;

use tracing::debug;

use crate::color::Color;
use crate::document::Document;
use crate::search::{Query, Scope, ScopeResolver, Search, SearchResult};

/// Recuento de palabras tras una pasada de resaltado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSummary {
    pub total_words: usize,
    pub highlighted_words: usize,
}

impl HighlightSummary {
    pub fn of(document: &Document) -> Self {
        Self {
            total_words: document.len(),
            highlighted_words: document.highlighted_count(),
        }
    }

    /// Avisos para la barra de estado
    pub fn notices(&self) -> Vec<&'static str> {
        let mut notices = Vec::new();
        if self.total_words == 0 {
            notices.push("no hay texto que buscar");
        }
        if self.highlighted_words == 0 {
            notices.push("no se encontraron coincidencias");
        }
        notices
    }
}

impl fmt::Display for HighlightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "palabras: {} | resaltadas: {}",
            self.total_words, self.highlighted_words
        )?;
        for notice in self.notices() {
            write!(f, " | {}", notice)?;
        }
        Ok(())
    }
}

/// Aplica las búsquedas a un documento
#[derive(Debug, Default, Clone, Copy)]
pub struct Highlighter;

impl Highlighter {
    pub fn new() -> Self {
        Self
    }

    /// Calcula el color final de cada palabra sin modificar el documento
    pub fn assign(&self, document: &Document, queries: &[Query]) -> Vec<Option<Color>> {
        let results: Vec<(&Query, SearchResult)> = queries
            .iter()
            .map(|query| (query, Search::new(document, query).run()))
            .collect();
        let mut colors = vec![None; document.len()];

        for scope in [Scope::Paragraph, Scope::Sentence] {
            let group: Vec<&(&Query, SearchResult)> =
                results.iter().filter(|(query, _)| query.scope == scope).collect();
            if group.is_empty() {
                continue;
            }

            let resolver = ScopeResolver::new(scope);
            let Some(included) = resolver.resolve(group.iter().map(|(_, result)| result)) else {
                continue;
            };
            debug!(scope = %scope, units = included.len(), "grupo resuelto");

            for (query, result) in group {
                for id in resolver.retain(document, result, &included) {
                    colors[id] = Some(query.color);
                }
            }
        }

        for (query, result) in results
            .iter()
            .filter(|(query, _)| query.scope == Scope::WholeDocument)
        {
            for id in result.words() {
                colors[id] = Some(query.color);
            }
        }

        colors
    }

    /// Resalta el documento; las palabras que ninguna búsqueda toca quedan sin color
    pub fn apply(&self, document: &mut Document, queries: &[Query]) -> HighlightSummary {
        let colors = self.assign(document, queries);
        for (id, color) in colors.into_iter().enumerate() {
            document.set_highlight(id, color);
        }

        let summary = HighlightSummary::of(document);
        debug!(
            total = summary.total_words,
            highlighted = summary.highlighted_words,
            "pasada de resaltado"
        );
        summary
    }
}
