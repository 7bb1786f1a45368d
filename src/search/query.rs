//! Búsquedas definidas por el usuario

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::document::strip_trailing_mark;
use crate::error::Error;

/// Ámbito en el que deben coincidir las búsquedas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// Búsqueda individual sobre todo el documento
    #[default]
    #[serde(rename = "document", alias = "documento")]
    WholeDocument,
    #[serde(rename = "sentence", alias = "oracion")]
    Sentence,
    #[serde(rename = "paragraph", alias = "parrafo")]
    Paragraph,
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" | "documento" | "doc" | "whole" | "individual" => Ok(Scope::WholeDocument),
            "sentence" | "oracion" | "oración" | "s" => Ok(Scope::Sentence),
            "paragraph" | "parrafo" | "párrafo" | "p" => Ok(Scope::Paragraph),
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::WholeDocument => "document",
            Scope::Sentence => "sentence",
            Scope::Paragraph => "paragraph",
        };
        f.write_str(name)
    }
}

/// Modo de coincidencia: palabra exacta o subcadena, con o sin mayúsculas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchMode {
    pub exact: bool,
    pub case_sensitive: bool,
}

impl MatchMode {
    pub fn new(exact: bool, case_sensitive: bool) -> Self {
        Self {
            exact,
            case_sensitive,
        }
    }

    /// Comprueba si el texto normalizado de una palabra satisface la palabra clave
    pub fn matches(&self, word: &str, keyword: &str) -> bool {
        match (self.exact, self.case_sensitive) {
            (true, true) => word == keyword,
            (false, true) => word.contains(keyword),
            (true, false) => word.to_lowercase() == keyword.to_lowercase(),
            (false, false) => word.to_lowercase().contains(&keyword.to_lowercase()),
        }
    }
}

/// Búsqueda: lista ordenada de palabras clave, ámbito, modo y color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuerySpec", into = "QuerySpec")]
pub struct Query {
    pub keywords: Vec<String>,
    pub scope: Scope,
    pub mode: MatchMode,
    pub color: Color,
}

impl Query {
    /// Crea una búsqueda a partir del texto de la caja de búsqueda
    pub fn new(text: &str) -> Self {
        Self {
            keywords: parse_keywords(text),
            scope: Scope::default(),
            mode: MatchMode::default(),
            color: Color::default(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn exact(mut self, exact: bool) -> Self {
        self.mode.exact = exact;
        self
    }

    pub fn match_case(mut self, case_sensitive: bool) -> Self {
        self.mode.case_sensitive = case_sensitive;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Divide el texto en palabras clave normalizadas igual que las palabras del documento
pub fn parse_keywords(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| strip_trailing_mark(token).0)
        // Un signo suelto no es palabra clave
        .filter(|keyword| !matches!(*keyword, "." | "?" | "!" | ","))
        .map(str::to_string)
        .collect()
}

/// Forma serializada de una búsqueda (archivos de búsquedas)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuerySpec {
    keywords: String,
    #[serde(default)]
    scope: Scope,
    #[serde(default)]
    exact: bool,
    #[serde(default)]
    match_case: bool,
    #[serde(default)]
    color: Color,
}

impl From<QuerySpec> for Query {
    fn from(spec: QuerySpec) -> Self {
        Query::new(&spec.keywords)
            .with_scope(spec.scope)
            .with_mode(MatchMode::new(spec.exact, spec.match_case))
            .with_color(spec.color)
    }
}

impl From<Query> for QuerySpec {
    fn from(query: Query) -> Self {
        QuerySpec {
            keywords: query.keywords.join(" "),
            scope: query.scope,
            exact: query.mode.exact,
            match_case: query.mode.case_sensitive,
            color: query.color,
        }
    }
}
