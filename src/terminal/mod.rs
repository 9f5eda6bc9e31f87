// src/terminal/mod.rs
//! Terminal password entry
//!
//! `echo` holds the scoped echo guard, `tty` the termios-backed controlling
//! terminal, `reader` the prompt/read/confirm logic over any terminal.

pub mod echo;
pub mod reader;
#[cfg(unix)]
pub mod tty;

pub use echo::{EchoControl, EchoGuard};
pub use reader::{acquire_password, prompt_password, read_line, PasswordTerminal};
#[cfg(unix)]
pub use tty::TtyTerminal;
