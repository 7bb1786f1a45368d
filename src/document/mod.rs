//! Documento tokenizado
//!
//! Un `Document` es una instantánea inmutable del texto bloqueado: palabras,
//! oraciones, párrafos y el índice de palabras. Se reconstruye entera en cada
//! bloqueo o edición estructural; los identificadores de palabra de una
//! instantánea no son válidos en la siguiente.

pub mod tokenizer;

use std::collections::HashMap;

use crate::color::Color;

pub use tokenizer::{strip_trailing_mark, Tokenizer};

/// Tramo `[start, end)` en bytes sobre el texto original
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Palabra indexada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Texto normalizado (sin el signo final)
    pub text: String,
    pub paragraph: usize,
    pub sentence: usize,
    /// Inicio en el texto original
    pub start: usize,
    /// Fin del texto normalizado; no incluye el signo quitado
    pub end: usize,
    /// Posición (desde cero) en la secuencia de palabras
    pub index: usize,
    /// Se quitó un signo final al normalizar
    pub punctuation: bool,
    pub highlight: Option<Color>,
}

impl Word {
    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    /// Fin real del token en el texto, incluido el signo quitado
    pub fn full_end(&self) -> usize {
        self.end + usize::from(self.punctuation)
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.full_end())
    }
}

/// Instantánea tokenizada de un documento
#[derive(Debug, Clone, Default)]
pub struct Document {
    words: Vec<Word>,
    paragraphs: Vec<Span>,
    sentences: Vec<Span>,
    index: HashMap<String, Vec<usize>>,
    len: usize,
}

impl Document {
    /// Atajo para `Tokenizer::new().tokenize(text)`
    pub fn new(text: &str) -> Self {
        Tokenizer::new().tokenize(text)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, id: usize) -> Option<&Word> {
        self.words.get(id)
    }

    /// Palabra siguiente, si existe
    pub fn next_word(&self, id: usize) -> Option<&Word> {
        self.words.get(id.checked_add(1)?)
    }

    /// Palabra anterior, si existe
    pub fn word_before(&self, id: usize) -> Option<&Word> {
        self.words.get(id.checked_sub(1)?)
    }

    pub fn paragraphs(&self) -> &[Span] {
        &self.paragraphs
    }

    pub fn sentences(&self) -> &[Span] {
        &self.sentences
    }

    /// Identificadores de las apariciones de un texto normalizado exacto
    pub fn occurrences(&self, text: &str) -> &[usize] {
        self.index.get(text).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entradas del índice: texto normalizado y sus apariciones
    pub fn index_entries(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.index.iter().map(|(text, ids)| (text.as_str(), ids.as_slice()))
    }

    /// Número de palabras
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Longitud en bytes del texto tokenizado
    pub fn text_len(&self) -> usize {
        self.len
    }

    pub fn highlighted_count(&self) -> usize {
        self.words.iter().filter(|w| w.is_highlighted()).count()
    }

    pub(crate) fn set_highlight(&mut self, id: usize, color: Option<Color>) {
        if let Some(word) = self.words.get_mut(id) {
            word.highlight = color;
        }
    }

    pub fn clear_highlights(&mut self) {
        for word in &mut self.words {
            word.highlight = None;
        }
    }
}
