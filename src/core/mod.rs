// src/core/mod.rs
pub mod entropy;
pub mod erase;
pub mod keyfile;
pub mod transcode;

pub use entropy::*;
pub use erase::*;
pub use keyfile::*;
pub use transcode::*;
