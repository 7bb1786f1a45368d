//! Configuración y argumentos CLI

use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::export::DEFAULT_EXPORT_DIR;
use crate::render::Format;
use crate::search::{Query, Scope};
use crate::session::PruneUnit;

#[derive(Debug, Clone)]
pub struct Config {
    /// Archivo de entrada
    pub input_file: Option<String>,
    /// Archivo de salida (por defecto, salida estándar)
    pub output_file: Option<String>,
    /// Texto a resaltar (argumento posicional)
    pub text: Option<String>,
    /// Búsquedas dadas en la línea de órdenes, en orden
    pub queries: Vec<Query>,
    /// Archivo JSON con búsquedas adicionales
    pub query_file: Option<PathBuf>,
    /// Formato de salida (default: html)
    pub format: Format,
    /// Título del documento exportado
    pub title: String,
    /// Poda tras resaltar
    pub prune: Option<PruneUnit>,
    /// Directorio de exportación
    pub export_dir: Option<PathBuf>,
    /// Nombre base de exportación
    pub export_name: Option<String>,
    /// Generar nombre aleatorio de exportación
    pub random_name: bool,
    /// Mostrar recuentos en stderr
    pub stats: bool,
    /// Mostrar ayuda
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: None,
            output_file: None,
            text: None,
            queries: Vec::new(),
            query_file: None,
            format: Format::Html,
            title: "Exported Document".to_string(),
            prune: None,
            export_dir: None,
            export_name: None,
            random_name: false,
            stats: false,
            show_help: false,
        }
    }
}

impl Config {
    pub fn from_args(args: Vec<String>) -> std::result::Result<Self, String> {
        let mut config = Config::default();
        let mut args_iter = args.into_iter().skip(1); // Skip program name

        while let Some(arg) = args_iter.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    config.show_help = true;
                    return Ok(config);
                }
                "-i" | "--input" => {
                    config.input_file = Some(args_iter.next().ok_or("--input requiere un valor")?);
                }
                "-o" | "--output" => {
                    config.output_file =
                        Some(args_iter.next().ok_or("--output requiere un valor")?);
                }
                "-k" | "--keywords" => {
                    let keywords = args_iter.next().ok_or("--keywords requiere un valor")?;
                    config.queries.push(Query::new(&keywords));
                }
                "-s" | "--scope" => {
                    let scope = args_iter.next().ok_or("--scope requiere un valor")?;
                    let scope: Scope = scope.parse().map_err(|e: Error| e.to_string())?;
                    config.last_query(&arg)?.scope = scope;
                }
                "-e" | "--exact" => {
                    config.last_query(&arg)?.mode.exact = true;
                }
                "-c" | "--match-case" => {
                    config.last_query(&arg)?.mode.case_sensitive = true;
                }
                "--color" => {
                    let color = args_iter.next().ok_or("--color requiere un valor")?;
                    let color: Color = color.parse().map_err(|e: Error| e.to_string())?;
                    config.last_query(&arg)?.color = color;
                }
                "-q" | "--queries" => {
                    config.query_file =
                        Some(PathBuf::from(args_iter.next().ok_or("--queries requiere un valor")?));
                }
                "-f" | "--format" => {
                    let format = args_iter.next().ok_or("--format requiere un valor")?;
                    config.format = format.parse::<Format>().map_err(|e: Error| e.to_string())?;
                }
                "-t" | "--title" => {
                    config.title = args_iter.next().ok_or("--title requiere un valor")?;
                }
                "--prune" => {
                    let unit = args_iter.next().ok_or("--prune requiere un valor")?;
                    config.prune = Some(unit.parse::<PruneUnit>().map_err(|e: Error| e.to_string())?);
                }
                "--export-dir" => {
                    config.export_dir =
                        Some(PathBuf::from(args_iter.next().ok_or("--export-dir requiere un valor")?));
                }
                "--name" => {
                    config.export_name = Some(args_iter.next().ok_or("--name requiere un valor")?);
                }
                "--random-name" => {
                    config.random_name = true;
                }
                "--stats" => {
                    config.stats = true;
                }
                _ => {
                    if arg.starts_with('-') {
                        return Err(format!("Opción desconocida: {}", arg));
                    }
                    // Argumento posicional = texto a resaltar
                    config.text = Some(arg);
                }
            }
        }

        Ok(config)
    }

    /// Búsqueda a la que se aplican los modificadores
    fn last_query(&mut self, option: &str) -> std::result::Result<&mut Query, String> {
        self.queries
            .last_mut()
            .ok_or_else(|| format!("{} requiere una búsqueda previa (-k)", option))
    }

    /// Directorio de exportación; `--name`/`--random-name` sin directorio usan el de por defecto
    pub fn export_target(&self) -> Option<PathBuf> {
        match &self.export_dir {
            Some(dir) => Some(dir.clone()),
            None if self.export_name.is_some() || self.random_name => {
                Some(PathBuf::from(DEFAULT_EXPORT_DIR))
            }
            None => None,
        }
    }

    /// Búsquedas finales: primero las del archivo, después las de la línea de órdenes
    pub fn all_queries(&self) -> Result<Vec<Query>> {
        let mut queries = match &self.query_file {
            Some(path) => load_query_file(path)?,
            None => Vec::new(),
        };
        queries.extend(self.queries.iter().cloned());
        Ok(queries)
    }

    pub fn print_help() {
        println!(
            r#"Resaltador - Resaltado contextual de documentos

USO:
    resaltador [OPCIONES] [TEXTO]

ARGUMENTOS:
    [TEXTO]    Texto a resaltar

OPCIONES:
    -h, --help                  Muestra esta ayuda
    -i, --input <ARCHIVO>       Archivo de entrada
    -o, --output <ARCHIVO>      Archivo de salida
    -k, --keywords <TEXTO>      Nueva búsqueda (frase ordenada)
    -s, --scope <ÁMBITO>        document | sentence | paragraph (última búsqueda)
    -e, --exact                 Palabra exacta (última búsqueda)
    -c, --match-case            Distinguir mayúsculas (última búsqueda)
    --color <COLOR>             #rrggbb o nombre (última búsqueda)
    -q, --queries <ARCHIVO>     Búsquedas en JSON
    -f, --format <FORMATO>      html | text (default: html)
    -t, --title <TÍTULO>        Título del documento (default: Exported Document)
    --prune <UNIDAD>            sentences | paragraphs: conserva solo lo resaltado
    --export-dir <DIR>          Exporta a <DIR>/<nombre>.<html|txt> (default: tmp)
    --name <NOMBRE>             Nombre de exportación (si no, se pregunta)
    --random-name               Nombre de exportación aleatorio
    --stats                     Muestra recuentos de palabras en stderr

EJEMPLOS:
    resaltador -k "quick fox" -e -c "The quick fox jumps."
    resaltador -i doc.txt -k alpha -s paragraph -k beta -s paragraph
    resaltador -i doc.txt -q busquedas.json --prune sentences -f text
    resaltador -i doc.txt -k fox --export-dir tmp --name informe"#
        );
    }
}

/// Carga un archivo JSON con una lista de búsquedas
///
/// Formato: `[{ "keywords": "quick fox", "scope": "sentence", "exact": true,
/// "match_case": false, "color": "#ffff00" }]`
pub fn load_query_file<P: AsRef<Path>>(path: P) -> Result<Vec<Query>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::QueryFile {
        path: path.to_path_buf(),
        source,
    })
}
