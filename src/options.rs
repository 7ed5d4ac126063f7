use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs many images into a single texture atlas")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// How many threads to decode images with. Defaults to one per CPU.
    #[structopt(long)]
    pub threads: Option<usize>,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the images matched by an atlasmith.toml into an atlas image and a
    /// JSON manifest describing where each image ended up.
    Pack(PackOptions),

    /// Print the fingerprint of a set of asset names as 16 hexadecimal digits.
    Fingerprint(FingerprintOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The atlasmith.toml file, or the folder containing it. Defaults to the
    /// current working directory.
    pub path: Option<PathBuf>,

    /// Rebuild the atlas even if the manifest says it's up to date.
    #[structopt(long)]
    pub force: bool,
}

#[derive(Debug, StructOpt)]
pub struct FingerprintOptions {
    /// The names to fingerprint. Order and repeats don't matter.
    pub names: Vec<String>,
}
