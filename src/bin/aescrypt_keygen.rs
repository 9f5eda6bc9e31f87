// src/bin/aescrypt_keygen.rs
//! AES Crypt key file generator
//!
//! Stores a password as a BOM-prefixed UTF-16LE file so that AES Crypt can be
//! given `-k <keyfile>` instead of a password typed at a prompt or exposed on
//! the command line.

use std::process::ExitCode;

use aescrypt_keygen::cli::{self, Cli};
use aescrypt_keygen::logging;
use clap::Parser;

fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();
    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
