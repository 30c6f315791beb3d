use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use docpage::{Config, Page, Variant};

#[derive(Parser)]
#[command(name = "docpage")]
#[command(about = "Render a documentation page from structured content")]
struct Cli {
    /// Content file (.toml or .json)
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Framework variant to render for: vue2, vue3, react or svelte
    #[arg(short, long)]
    variant: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Only write the navigation outline
    #[arg(long)]
    outline: bool,

    /// Config file (defaults to docpage.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("docpage.toml"));
    let config = match Config::load(&config_path) {
        Ok(Some(config)) => {
            log::info!("Using config {}", config_path.display());
            config
        }
        Ok(None) => Config::compiled_default(),
        Err(e) => fail(&e),
    };

    let page = match docpage::load_page_with_config(&cli.input, &config) {
        Ok(page) => page,
        Err(e) => fail(&e),
    };

    let variant = match active_variant(&cli, &config, &page) {
        Ok(variant) => variant,
        Err(e) => fail(&e),
    };
    log::info!("Rendering {:?} for {}", page.title(), variant);

    let rendered = if cli.outline {
        match cli.format {
            Format::Html => Ok(docpage::outline_to_html(page.outline())),
            Format::Json => serde_json::to_string_pretty(page.outline()).map_err(|e| e.to_string()),
        }
    } else {
        docpage::render(&page, variant)
            .map_err(|e| e.to_string())
            .and_then(|doc| match cli.format {
                Format::Html => Ok(docpage::document_to_html(&doc)),
                Format::Json => serde_json::to_string_pretty(&doc).map_err(|e| e.to_string()),
            })
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => fail(&e),
    };

    match &cli.output {
        Some(output) => {
            if let Err(e) = write_output(output, &rendered) {
                fail(&e);
            }
            println!("Created {}", output.display());
        }
        None => print!("{rendered}"),
    }
}

/// Command line flag, then configured default, then the page's first variant.
fn active_variant(cli: &Cli, config: &Config, page: &Page) -> Result<Variant, String> {
    if let Some(key) = &cli.variant {
        return key.parse().map_err(|e: docpage::ComposeError| e.to_string());
    }
    if let Some(variant) = config.variants.default_variant().map_err(|e| e.to_string())? {
        return Ok(variant);
    }
    page.variants()
        .first()
        .copied()
        .ok_or_else(|| "page declares no variants".to_string())
}

fn write_output(output: &Path, rendered: &str) -> Result<(), String> {
    fs::write(output, rendered).map_err(|e| format!("could not write {}: {}", output.display(), e))
}

fn fail(message: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
