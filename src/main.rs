use std::path::PathBuf;

use clap::Parser;

use wellmesh::mesher;

/// Generates a 1D radial finite-element mesh of a cemented well
/// cross-section: casing, cement sheath, and rock formation.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Input json with well geometry and optional standoff parameters
    input_json: PathBuf,

    /// Directory where the mesh files are written
    #[arg(default_value = "mesh")]
    output_dir: PathBuf,

    /// Override the decimal precision of coordinate output
    #[arg(long)]
    decimals: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = mesher::run(&cli.input_json, &cli.output_dir, cli.decimals) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
