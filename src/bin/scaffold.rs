use std::path::PathBuf;

use clap::Parser;

use crudforge::scaffold::Generator;

/// Stamp out a new feature module from the templates and wire it into the
/// route registry.
#[derive(Parser)]
#[command(name = "scaffold")]
struct Cli {
    /// Feature path, e.g. `customer` or `master/area`.
    feature: String,

    /// Project root containing `src/` and `templates/`.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let generator = Generator::new(&cli.root, cli.root.join("templates"));
    generator.run(&cli.feature)
}
