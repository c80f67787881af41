//! Bind a configuration struct to command-line flags and environment
//! variables, then print it safely.
//!
//! Declare the settings your program needs as a struct, derive [`Conf`],
//! and load it at startup:
//!
//! ```no_run
//! use std::time::Duration;
//! use clapconf::Conf;
//!
//! #[derive(Conf, Clone, Default, Debug)]
//! struct Config {
//!     /// who to log in as
//!     #[conf(name = "name", noredact)]
//!     pub username: String,
//!     #[conf]
//!     pub password: String,
//!     #[conf(noredact)]
//!     pub timeout: Duration,
//! }
//!
//! let mut config = Config { timeout: Duration::from_secs(60), ..Config::default() };
//! clapconf::Loader::new().load_or_exit(&mut config);
//! println!("{:?}", clapconf::redact(&config).unwrap());
//! ```
//!
//! Run as `login -name=jdoe` with `LOGIN_PASSWORD=hunter2` in the
//! environment and `config` holds both values; the redacted copy printed
//! keeps `username` and `timeout` and blanks `password`.
//!
//! # Field attributes
//!
//! Only `pub` fields carrying a `#[conf]` attribute take part:
//!
//! - **`#[conf]`** binds the field under its own identifier.
//! - **`#[conf(name = "go-fast")]`** picks the exposed name. `name = ""`
//!   excludes the field entirely.
//! - **`#[conf(noredact)]`** keeps the field in redacted copies.
//! - **`#[conf(usage = "...")]`** sets the help text. Without it, the first
//!   paragraph of the field's doc comment is used.
//!
//! Supported field types are `bool`, `i32`, `i64`, `isize`, `u16`, `u32`,
//! `u64`, `usize`, `f64`, `String`, [`Duration`](std::time::Duration) and
//! nested `#[derive(Conf)]` structs. Fields of other types (`Vec`, `Option`,
//! maps, your own types via `impl Field for T {}`) are never bound but may
//! still be kept by redaction.
//!
//! # Option names
//!
//! Nested structs contribute their fields under the parent's name, joined
//! with `-`:
//!
//! ```text
//! struct Config { #[conf(name = "primary-db")] db: Db }
//! struct Db     { #[conf] dsn: String }
//!
//! --primary-db-dsn <string>   (env var PROG_PRIMARY_DB_DSN)
//! ```
//!
//! Flags are accepted as `--name value`, `--name=value`, `-name value` and
//! `-name=value`. Boolean flags take no value (`-verbose`) or an attached one
//! (`-verbose=false`). When a flag repeats, the last occurrence wins.
//! Options end at the first argument that is not an option, or at `--`;
//! [`Loader::load`] returns the remaining arguments as operands.
//!
//! # Value syntax
//!
//! The same parser reads flag values and environment variables:
//!
//! - **Booleans**: `1 t T true TRUE True` and `0 f F false FALSE False`.
//! - **Integers**: decimal with an optional sign, or `0x`/`0o`/`0b` prefixed.
//!   A leading `0` does **not** mean octal (`010` is ten), and `_` digit
//!   separators are rejected (`1_000` is an error).
//! - **Durations**: a sequence of numbers with units, e.g. `300ms`, `1h30m`,
//!   `1.5s`. Units are `ns`, `us` (`µs`), `ms`, `s`, `m` and `h`; a bare `0`
//!   is accepted and negative durations are not.
//!
//! # Environment variables
//!
//! Every option also reads the variable named after the program and the
//! option, converted with [`screaming_snake`]: program `cmd` (or
//! `/usr/bin/cmd`) and option `SubConfig-String` give
//! `CMD_SUB_CONFIG_STRING`. The variable name is appended to the option's
//! help as `(env var CMD_SUB_CONFIG_STRING)`.
//!
//! # Precedence
//!
//! ```text
//! Field value before loading      the default
//!        ↑ overridden by
//! Environment variable            CMD_SUB_CONFIG_STRING=...
//!        ↑ overridden by
//! Command-line flag               --SubConfig-String ...
//! ```
//!
//! An empty value counts as set: `CMD_STRING=` replaces a default with `""`.
//!
//! # Redaction
//!
//! [`redact`] returns a copy in which every field not marked `noredact` is
//! reset to its default. A kept nested struct is redacted field by field; a
//! nested struct that is not kept is reset as a whole, whatever its own
//! fields are marked.
//!
//! # Errors
//!
//! All fallible operations return [`ConfError`].
//! [`is_operator_error`](ConfError::is_operator_error) separates bad input
//! (a value that does not parse, an unknown flag, a help request) from
//! mistakes in the configuration type (duplicate or invalid option names,
//! redacting a non-struct). [`Loader::load_or_exit`] turns either into a
//! message and an exit status.

extern crate self as clapconf;

pub mod bind;
pub mod case;
pub mod env;
pub mod error;
pub mod field;
pub mod redact;
pub mod registry;
pub mod value;
pub mod walk;

mod loader;

#[cfg(test)]
mod fixtures;

pub use bind::OptionInfo;
pub use case::screaming_snake;
pub use clapconf_derive::Conf;
pub use env::{Environment, ProcessEnv, env_var_name};
pub use error::{ConfError, ParseError};
pub use field::{Conf, Field, FieldMeta, Shape};
pub use loader::{Loader, load};
pub use redact::redact;
pub use value::{Kind, Slot};
