//! flashgen CLI
//!
//! Entry point for the `flashgen` command-line tool. Prints the rendered
//! module to stdout, writes it to the output file unless CI mode is set, and
//! keeps every diagnostic on stderr.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use flashgen::remote::GitRemote;
use flashgen::{generate, write_output, CliOverrides, EnvSnapshot, GeneratorConfig, Reporter};

#[derive(Parser)]
#[command(name = "flashgen")]
#[command(about = "Generate the web flasher project configuration", version)]
struct Cli {
    /// Repository root the default paths are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Projects directory (default: <root>/sensors)
    #[arg(long)]
    projects_dir: Option<PathBuf>,

    /// Output file (default: <root>/docs/flasher/js/projects-config.js)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Release version for firmware download URLs (env: VERSION)
    #[arg(long)]
    release: Option<String>,

    /// Repository in owner/repo form (env: GITHUB_REPOSITORY)
    #[arg(long)]
    repository: Option<String>,

    /// CI mode: print to stdout only, skip the file write (env: CI=true)
    #[arg(long)]
    ci: bool,
}

fn main() {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        root: Some(cli.root),
        projects_dir: cli.projects_dir,
        output: cli.output,
        version: cli.release,
        repository: cli.repository,
        ci: cli.ci,
    };
    let config = GeneratorConfig::resolve(overrides, EnvSnapshot::capture());

    let lookup = GitRemote::new(&config.root);
    let mut reporter = Reporter::stderr();

    let rendered = match generate(&config, &lookup, &mut reporter) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("{}", rendered);

    if !config.ci_mode {
        if let Err(e) = write_output(&config.output_path, &rendered) {
            eprintln!(
                "Error: failed to write {}: {}",
                config.output_path.display(),
                e
            );
            process::exit(1);
        }
        eprintln!("Wrote: {}", config.output_path.display());
    }

    eprintln!("Configuration generated successfully");
}
