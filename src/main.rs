use std::fs;
use std::io::{self, BufRead};
use std::process;

use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

use resaltador::export::{Exporter, FixedName, NamePrompt, NameResponse};
use resaltador::{Config, ExportOutcome, Renderer, Session};

/// Pide el nombre de exportación por la entrada estándar
struct StdinPrompt;

impl NamePrompt for StdinPrompt {
    fn export_name(&mut self) -> NameResponse {
        eprint!("Nombre del archivo (vacío para cancelar, * para nombre aleatorio): ");

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => match line.trim() {
                "" => NameResponse::Cancelled,
                "*" => NameResponse::Generated,
                name => NameResponse::Named(name.to_string()),
            },
            Err(_) => NameResponse::Cancelled,
        }
    }
}

fn main() {
    // Los registros van a stderr; stdout queda para el documento
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = match Config::from_args(std::env::args().collect()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            Config::print_help();
            process::exit(1);
        }
    };

    if config.show_help {
        Config::print_help();
        return;
    }

    // Obtener texto a resaltar
    let text = if let Some(ref input_file) = config.input_file {
        match fs::read_to_string(input_file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error leyendo archivo '{}': {}", input_file, e);
                process::exit(1);
            }
        }
    } else if let Some(ref text) = config.text {
        text.clone()
    } else {
        eprintln!("Error: No se proporcionó texto para resaltar.");
        eprintln!();
        Config::print_help();
        process::exit(1);
    };

    let queries = match config.all_queries() {
        Ok(queries) => queries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut session = Session::new(text);
    for query in queries {
        if let Err(e) = session.add_query(query) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    session.lock();
    let mut summary = match session.highlight() {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Some(unit) = config.prune {
        match session.prune(unit) {
            Ok(report) => {
                eprintln!("Eliminados: {} ({})", report.removed, unit);
                summary = report.summary;
            }
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        }
    }

    if config.stats {
        eprintln!("{}", summary);
    }

    let renderer = Renderer::new(config.title.clone());

    // Exportar a directorio con nombre
    if let Some(dir) = config.export_target() {
        let exporter = Exporter::new(dir, renderer);
        let mut prompt: Box<dyn NamePrompt> = if config.random_name {
            Box::new(|| NameResponse::Generated)
        } else if config.export_name.is_some() {
            Box::new(FixedName(config.export_name.clone()))
        } else {
            Box::new(StdinPrompt)
        };

        match session.export(&exporter, config.format, &mut *prompt) {
            Ok(ExportOutcome::Written(path)) => println!("{}", path.display()),
            Ok(ExportOutcome::Aborted) => eprintln!("Exportación cancelada."),
            Err(e) => {
                eprintln!("Error exportando: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let result = match session.render(&renderer, config.format) {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    // Escribir resultado
    if let Some(ref output_file) = config.output_file {
        if let Err(e) = fs::write(output_file, &result) {
            eprintln!("Error escribiendo archivo '{}': {}", output_file, e);
            process::exit(1);
        }
    } else {
        print!("{}", result);
    }
}
