mod inspect;
mod prepro;

/// Subcommands for refprep.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Preprocess a dataset into a JSON document and a label archive.
    Prepro(prepro::PreproArgs),

    /// Decode and print rows of a written label archive.
    Inspect(inspect::InspectArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Prepro(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
        }
    }
}
