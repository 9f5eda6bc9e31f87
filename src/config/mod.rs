// src/config/mod.rs
//! Configuration system for aescrypt-keygen
//!
//! Lazy-loaded global config: TOML file named by `AESCRYPT_KEYGEN_CONFIG`,
//! built-in defaults when the file is absent.

pub use app::{load, Config, Entropy, Locale, Terminal};

mod app;
mod defaults;
