// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Entropy, Terminal};
use crate::consts::{DEFAULT_ENTROPY_DEVICE, DEFAULT_TTY_DEVICE};
use crate::enums::EntropyKind;

pub fn default_terminal() -> Terminal {
    Terminal {
        device: DEFAULT_TTY_DEVICE.into(),
    }
}

pub fn default_entropy_device() -> PathBuf {
    DEFAULT_ENTROPY_DEVICE.into()
}

pub fn default_entropy() -> Entropy {
    Entropy {
        source: EntropyKind::Os,
        device: default_entropy_device(),
    }
}
