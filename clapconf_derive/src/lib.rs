//! Procedural macros for `clapconf`.
//!
//! `#[derive(Conf)]` generates the static field table and the accessors the
//! `clapconf` walks run over. Nothing is inspected at runtime: each field's
//! exposed name, usage and redaction marking are fixed at compile time.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod expand;

/// Derive `clapconf::Conf` and `clapconf::Field` for a struct with named
/// fields.
///
/// ```ignore
/// #[derive(Conf, Clone, Default, Debug)]
/// struct Config {
///     #[conf(name = "name", noredact, usage = "who to log in as")]
///     pub username: String,
///     #[conf(name = "password")]
///     pub password: String,
/// }
/// ```
#[proc_macro_derive(Conf, attributes(conf))]
pub fn derive_conf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
