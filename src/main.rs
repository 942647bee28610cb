// main.rs
//
// Command-line front end: `generate` runs the roster through OpenSCAD,
// `convert` merges one entry's three STLs into a STEP file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use tagsmith::compiler::OpenScad;
use tagsmith::io::step::StepOptions;
use tagsmith::{ArtifactSet, Config, Generator, convert};

#[derive(Parser)]
#[command(author, version, about = "Nametag batch production: roster to STL via OpenSCAD, STL to STEP.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render backing, text and logo STLs for every roster entry.
    Generate(GenerateArgs),
    /// Merge three STLs into one multi-body STEP file.
    Convert(ConvertArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// TOML config file (defaults to ./tagsmith.toml when present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Roster CSV.
    #[arg(long, value_name = "FILE")]
    roster: Option<PathBuf>,
    /// OpenSCAD template.
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,
    /// Directory for generated files.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Organization text for rows without one.
    #[arg(long, value_name = "ORG")]
    org: Option<String>,
    /// OpenSCAD executable.
    #[arg(long, value_name = "EXE")]
    openscad: Option<PathBuf>,
    /// Also write `{id}.step` for every entry.
    #[arg(long)]
    step: bool,
    /// Regenerate entries with zero-byte meshes.
    #[arg(long)]
    require_nonempty: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Entry identifier, used in messages and as the STEP product name.
    id: String,
    backing: PathBuf,
    text: PathBuf,
    logo: PathBuf,
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Convert(args) => convert_one(args),
    }
}

fn load_config(args: &GenerateArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(std::env::current_dir().context("reading working directory")?)?,
    };

    if let Some(roster) = &args.roster {
        config.roster_path = roster.clone();
    }
    if let Some(template) = &args.template {
        config.template_path = template.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(org) = &args.org {
        config.default_org = org.clone();
    }
    if let Some(openscad) = &args.openscad {
        config.openscad = openscad.clone();
    }
    config.step |= args.step;
    config.require_nonempty |= args.require_nonempty;
    Ok(config)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args)?;
    info!(
        "roster {}, template {}, output {}",
        config.roster_path.display(),
        config.template_path.display(),
        config.output_dir.display()
    );

    let compiler = OpenScad::new(config.openscad.clone());
    let generator = Generator::new(config, compiler);
    generator
        .run_configured()
        .context("while generating nametag meshes")?;
    Ok(())
}

fn convert_one(args: ConvertArgs) -> Result<()> {
    let inputs = ArtifactSet::from_paths(&args.id, args.backing, args.text, args.logo);
    convert(&inputs, &args.output, &StepOptions::new(args.id.as_str()))
        .with_context(|| format!("Failed to export STEP for {}", args.id))?;
    Ok(())
}
