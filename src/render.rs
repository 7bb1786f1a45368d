//! Generación de la salida resaltada
//!
//! Las inserciones se hacen recorriendo las palabras de la última a la
//! primera, de modo que los desplazamientos pendientes (a la izquierda)
//! siguen siendo válidos.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::color::Color;
use crate::document::Document;
use crate::error::{Error, Result};

const PARAGRAPH_BREAK: &str = "<br /><br />";
const CLOSE_MARKER: &str = "</span>";
const FOOTER: &str = "</div></body></html>";

/// Formato de salida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Marcado HTML con resaltados y saltos de párrafo
    #[default]
    Html,
    /// Texto original sin marcado
    Text,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Text => "txt",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" | "markup" => Ok(Format::Html),
            "text" | "txt" | "plain" | "texto" => Ok(Format::Text),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Escapa los caracteres reservados del marcado
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn needs_escape(text: &str) -> bool {
    text.contains(['&', '<', '>', '"', '\''])
}

/// Genera el documento final a partir del texto original y sus palabras
#[derive(Debug, Clone)]
pub struct Renderer {
    title: String,
}

impl Renderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn render(&self, text: &str, document: &Document, format: Format) -> Result<String> {
        match format {
            Format::Html => self.render_html(text, document),
            Format::Text => Ok(Self::render_text(text)),
        }
    }

    /// Texto plano: el original sin cambios, sea cual sea el resaltado
    pub fn render_text(text: &str) -> String {
        text.to_string()
    }

    /// Marcado con saltos de párrafo y resaltados en línea
    pub fn render_html(&self, text: &str, document: &Document) -> Result<String> {
        if document.text_len() != text.len() {
            return Err(Error::OffsetOutOfBounds {
                offset: document.text_len(),
                len: text.len(),
            });
        }

        let mut body = text.to_string();
        let mut current_paragraph = document.words().last().map(|w| w.paragraph);

        for word in document.words().iter().rev() {
            let span = word.span();
            let original = text.get(span.start..span.end).ok_or(Error::OffsetOutOfBounds {
                offset: span.end,
                len: text.len(),
            })?;

            if current_paragraph.is_some_and(|p| word.paragraph < p) {
                body.insert_str(span.end, PARAGRAPH_BREAK);
                current_paragraph = Some(word.paragraph);
            }

            if word.is_highlighted() {
                body.insert_str(span.end, CLOSE_MARKER);
            }

            if needs_escape(original) {
                body.replace_range(span.start..span.end, &escape_markup(original));
            }

            if let Some(color) = word.highlight {
                body.insert_str(span.start, &Self::open_marker(color));
            }
        }

        debug!(words = document.len(), bytes = body.len(), "marcado generado");

        let mut output = self.header();
        output.push_str(&body);
        output.push_str(FOOTER);
        Ok(output)
    }

    fn open_marker(color: Color) -> String {
        format!("<span style='background-color:{}'>", color)
    }

    fn header(&self) -> String {
        format!(
            "<!DOCTYPE html><html lang='en'><head><meta charset='UTF-8'>\
             <meta name='viewport' content='width=device-width, initial-scale=1.0'>\
             <title>{}</title></head><body><div class='container mt-4'>",
            escape_markup(&self.title)
        )
    }
}
