mod commands;
mod data;
mod options;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    env_logger::init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    if let Some(threads) = options.global.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
        Subcommand::Fingerprint(fingerprint_options) => {
            commands::fingerprint(fingerprint_options)
        }
    }

    Ok(())
}
