//! Command-line interface.

use anyhow::{Context, Result, bail};
use clap::Parser;
use specbind_codegen::{Generator, load_from_xml};
use std::path::PathBuf;

/// Generate pybind11 bindings from a native struct catalogue.
#[derive(Debug, Parser)]
#[command(name = "specbind", version, about)]
pub struct Cli {
    /// Catalogue XML file
    pub catalogue: PathBuf,
    /// Write generated code to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emit only the property section
    #[arg(long, conflicts_with = "constructors_only")]
    pub properties_only: bool,
    /// Emit only the constructor section
    #[arg(long)]
    pub constructors_only: bool,
    /// Skip catalogue and manifest validation
    #[arg(long)]
    pub no_validate: bool,
}

/// Generates the sections selected by the command line.
///
/// # Errors
/// Returns an error if the catalogue cannot be read, parsed, validated, or
/// generated.
pub fn render(cli: &Cli) -> Result<String> {
    if cli.properties_only && cli.constructors_only {
        bail!("--properties-only and --constructors-only are mutually exclusive");
    }

    let xml = std::fs::read_to_string(&cli.catalogue)
        .with_context(|| format!("failed to read {}", cli.catalogue.display()))?;
    let (catalogue, manifest) = load_from_xml(&xml, !cli.no_validate)
        .with_context(|| format!("failed to load {}", cli.catalogue.display()))?;

    let generator = Generator::new(&catalogue, &manifest);
    let code = if cli.properties_only {
        generator.generate_properties()?
    } else if cli.constructors_only {
        generator.generate_constructors()?
    } else {
        generator.generate()?
    };
    Ok(code)
}

/// Runs the command, writing generated code to the output file or stdout.
///
/// # Errors
/// Returns an error if generation or writing fails.
pub fn run(cli: &Cli) -> Result<()> {
    let code = render(cli)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = code.len(), "wrote bindings");
        }
        None => print!("{code}"),
    }
    Ok(())
}
