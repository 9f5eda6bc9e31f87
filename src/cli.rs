// src/cli.rs
//! Command-line front end of the key file generator
//!
//! Flow: pick a password source, check there is exactly one output, acquire
//! the password, convert it to UTF-16LE, write BOM + password. Every secret
//! buffer is erased on the way out, whichever step fails.

use std::ffi::OsString;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use zeroize::Zeroizing;

use crate::aliases::Utf16Password;
use crate::config::{self, Config};
use crate::consts::MAX_PASSWD_LEN;
use crate::core::{generate_password, transcode, write_key_file, Codeset, Destination};
use crate::enums::EncryptMode;
use crate::terminal::prompt_password;

#[derive(Parser)]
#[cfg_attr(test, derive(Debug))]
#[command(
    name = "aescrypt_keygen",
    version = concat!("version ", env!("CARGO_PKG_VERSION")),
    disable_help_flag = true,
    disable_version_flag = true,
    override_usage = "aescrypt_keygen [ { -g <password length> | -p <password> } ] <keyfile>",
    about = "Generate an AES Crypt key file holding a UTF-16LE password.",
    help_template = "{about}\n\nusage: {usage}\n\n{all-args}\n"
)]
pub struct Cli {
    /// Generate a random password of this many characters (1-1024)
    #[arg(short = 'g', value_name = "password length", conflicts_with = "password")]
    pub generate: Option<usize>,

    /// Use this password instead of prompting; taken as bytes in the locale codeset
    #[arg(short = 'p', value_name = "password", value_parser = clap::value_parser!(OsString))]
    pub password: Option<OsString>,

    /// Key file to write; `-` writes to standard output
    #[arg(value_name = "keyfile", value_parser = clap::value_parser!(OsString))]
    pub outputs: Vec<OsString>,

    /// Print usage
    #[allow(dead_code)]
    #[arg(short = 'h', short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[allow(dead_code)]
    #[arg(short = 'v', action = ArgAction::Version)]
    version: Option<bool>,
}

/// How the password is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    Generate(usize),
    Literal,
    Prompt,
}

impl Cli {
    pub fn source(&self) -> PasswordSource {
        match (self.generate, &self.password) {
            (Some(length), _) => PasswordSource::Generate(length),
            (None, Some(_)) => PasswordSource::Literal,
            (None, None) => PasswordSource::Prompt,
        }
    }
}

pub fn run(mut cli: Cli) -> Result<()> {
    let config = config::load().context("Error loading configuration")?;
    let codeset = config.codeset().context("Error resolving the locale codeset")?;
    let source = cli.source();

    // Sources that need no interaction are handled before the output check
    let early = match source {
        PasswordSource::Generate(length) => Some(generate(config, length, codeset)?),
        PasswordSource::Literal => Some(literal(cli.password.take(), codeset)?),
        PasswordSource::Prompt => None,
    };

    if cli.outputs.len() != 1 {
        drop(early);
        bail!("Error: A single output file must be specified.");
    }
    let destination = Destination::parse(&cli.outputs[0]);

    let password = match early {
        Some(password) => password,
        None => prompt(config, codeset)?,
    };
    info!(?source, %destination, "writing key file");

    write_key_file(&destination, password)
        .with_context(|| format!("Error writing key file {destination}"))
}

fn generate(config: &Config, length: usize, codeset: Codeset) -> Result<Utf16Password> {
    let mut source = config.entropy_source();
    generate_password(length, source.as_mut(), codeset).context("Error generating password")
}

fn literal(password: Option<OsString>, codeset: Codeset) -> Result<Utf16Password> {
    let password = argument_bytes(password.unwrap_or_default())?;
    let mut utf16 = Utf16Password::new();
    let converted = transcode(&password, MAX_PASSWD_LEN, codeset, &mut utf16);
    drop(password);

    converted.context("Error converting password")?;
    if utf16.is_empty() {
        bail!("Error: password must not be empty");
    }
    Ok(utf16)
}

/// Raw argument octets, wiped when dropped
#[cfg(unix)]
fn argument_bytes(arg: OsString) -> Result<Zeroizing<Vec<u8>>> {
    use std::os::unix::ffi::OsStringExt;
    Ok(Zeroizing::new(arg.into_vec()))
}

#[cfg(not(unix))]
fn argument_bytes(arg: OsString) -> Result<Zeroizing<Vec<u8>>> {
    match arg.into_string() {
        Ok(text) => Ok(Zeroizing::new(text.into_bytes())),
        Err(_) => bail!("Error: password is not valid Unicode"),
    }
}

fn prompt(config: &Config, codeset: Codeset) -> Result<Utf16Password> {
    let mut typed = prompt_password(&config.terminal.device, EncryptMode::Encrypt)
        .context("Error reading password")?;
    if typed.is_empty() {
        bail!("Error reading password: password not provided");
    }

    let mut utf16 = Utf16Password::new();
    let converted = transcode(typed.expose_secret(), MAX_PASSWD_LEN, codeset, &mut utf16);
    typed.erase();
    converted.context("Error converting password")?;
    Ok(utf16)
}
