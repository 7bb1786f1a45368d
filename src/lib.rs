//! Resaltador - Biblioteca de resaltado contextual de documentos
//!
//! Tokeniza el texto en palabras, oraciones y párrafos, resuelve búsquedas
//! (frases ordenadas, coincidencia en la misma oración o párrafo) y genera el
//! documento resaltado conservando los desplazamientos del texto original.

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod highlight;
pub mod render;
pub mod search;
pub mod session;

pub use color::Color;
pub use config::Config;
pub use document::{Document, Span, Tokenizer, Word};
pub use error::{Error, Result};
pub use export::{ExportOutcome, Exporter, NamePrompt, NameResponse};
pub use highlight::{HighlightSummary, Highlighter};
pub use render::{Format, Renderer};
pub use search::{MatchMode, Query, Scope, ScopeResolver, Search, SearchResult};
pub use session::{PruneReport, PruneUnit, Session, MAX_QUERIES};
