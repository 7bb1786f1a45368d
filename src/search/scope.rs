//! Resolución de ámbito: coincidencia en la misma oración o párrafo

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::{Scope, SearchResult};
use crate::document::{Document, Word};

/// Combina los resultados de las búsquedas que comparten ámbito
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver {
    scope: Scope,
}

impl ScopeResolver {
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Unidad (oración o párrafo) a la que pertenece una palabra
    pub fn unit_of(&self, word: &Word) -> Option<usize> {
        match self.scope {
            Scope::WholeDocument => None,
            Scope::Sentence => Some(word.sentence),
            Scope::Paragraph => Some(word.paragraph),
        }
    }

    /// Intersección de las unidades tocadas por cada resultado.
    ///
    /// Devuelve `None` en cuanto un conjunto o una intersección parcial
    /// queda vacía: ninguna búsqueda del grupo se resalta.
    pub fn resolve<'r, I>(&self, results: I) -> Option<BTreeSet<usize>>
    where
        I: IntoIterator<Item = &'r SearchResult>,
    {
        let mut results = results.into_iter();
        let mut included = results.next()?.units(self.scope)?.clone();
        if included.is_empty() {
            debug!(scope = %self.scope, "primera búsqueda del grupo sin resultados");
            return None;
        }

        for result in results {
            let units = result.units(self.scope)?;
            included.retain(|unit| units.contains(unit));
            if included.is_empty() {
                warn!(scope = %self.scope, "sin unidades comunes; grupo descartado");
                return None;
            }
        }

        Some(included)
    }

    /// Palabras de un resultado cuya unidad está en la intersección
    pub fn retain<'d>(
        &self,
        document: &'d Document,
        result: &'d SearchResult,
        included: &'d BTreeSet<usize>,
    ) -> impl Iterator<Item = usize> + 'd {
        let resolver = *self;
        result.words().filter(move |&id| {
            document
                .word(id)
                .and_then(|word| resolver.unit_of(word))
                .is_some_and(|unit| included.contains(&unit))
        })
    }
}
