// src/consts.rs
//! Shared constants: password limits, file format, device defaults

/// Longest password accepted, in characters (and in locale octets when read)
pub const MAX_PASSWD_LEN: usize = 1024;

/// UTF-16LE buffer size: two octets per character plus room for a BOM
pub const MAX_PASSWD_BUF: usize = MAX_PASSWD_LEN * 2 + 2;

/// Byte-order mark written at the start of every key file (UTF-16LE)
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Byte-order mark of a big-endian key file, accepted when reading
pub const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Output path meaning "write to standard output"
pub const STDOUT_SENTINEL: &str = "-";

/// Controlling terminal, opened directly so redirected stdin cannot supply a secret
pub const DEFAULT_TTY_DEVICE: &str = "/dev/tty";

/// Random device read when `entropy.source = "device"`
pub const DEFAULT_ENTROPY_DEVICE: &str = "/dev/urandom";

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "AESCRYPT_KEYGEN_CONFIG";

/// Config file looked up in the working directory when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "aescrypt-keygen.toml";

// 64 symbols: 256 % 64 == 0, so `octet % 64` is unbiased
pub const PASSWORD_ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ%$";

pub const PROMPT: &str = "Enter password: ";
pub const CONFIRM_PROMPT: &str = "Re-Enter password: ";
