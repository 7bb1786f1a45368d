//! Exportación del documento resaltado
//!
//! El nombre del archivo lo decide un colaborador externo (`NamePrompt`),
//! que puede cancelar. Cancelar no es un error: devuelve `ExportOutcome::Aborted`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::render::{Format, Renderer};

/// Directorio de exportación por defecto
pub const DEFAULT_EXPORT_DIR: &str = "tmp";

/// Respuesta del colaborador que pide el nombre de exportación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResponse {
    Named(String),
    /// Nombre aleatorio (UUID v4)
    Generated,
    Cancelled,
}

/// Colaborador que proporciona el nombre base del archivo exportado
pub trait NamePrompt {
    fn export_name(&mut self) -> NameResponse;
}

impl<F> NamePrompt for F
where
    F: FnMut() -> NameResponse,
{
    fn export_name(&mut self) -> NameResponse {
        self()
    }
}

/// Nombre fijo conocido de antemano
#[derive(Debug, Clone)]
pub struct FixedName(pub Option<String>);

impl NamePrompt for FixedName {
    fn export_name(&mut self) -> NameResponse {
        match self.0.take() {
            Some(name) => NameResponse::Named(name),
            None => NameResponse::Cancelled,
        }
    }
}

/// Resultado de una exportación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    Aborted,
}

pub struct Exporter {
    dir: PathBuf,
    renderer: Renderer,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, renderer: Renderer) -> Self {
        Self {
            dir: dir.into(),
            renderer,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resuelve el nombre base; `None` si se cancela o queda vacío
    fn resolve_name(prompt: &mut dyn NamePrompt) -> Option<String> {
        match prompt.export_name() {
            NameResponse::Named(name) => {
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            NameResponse::Generated => Some(Uuid::new_v4().to_string()),
            NameResponse::Cancelled => None,
        }
    }

    /// Genera la salida y la escribe en `<dir>/<nombre>.<extensión>`.
    ///
    /// El estado de resaltado del documento no se modifica, ni siquiera si la
    /// escritura falla.
    pub fn export(
        &self,
        text: &str,
        document: &Document,
        format: Format,
        prompt: &mut dyn NamePrompt,
    ) -> Result<ExportOutcome> {
        let Some(name) = Self::resolve_name(prompt) else {
            info!("exportación cancelada");
            return Ok(ExportOutcome::Aborted);
        };

        let content = self.renderer.render(text, document, format)?;
        let path = self.dir.join(format!("{}.{}", name, format.extension()));

        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;
        Self::write(&path, content.as_bytes()).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), format = %format, bytes = content.len(), "documento exportado");
        Ok(ExportOutcome::Written(path))
    }

    fn write(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(data)?;
        file.flush()
    }
}
