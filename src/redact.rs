//! Redacted copies of configuration records, safe to log or print.
//!
//! Redaction works from an allow-list. A field survives only if it is bound
//! (public, tagged with `#[conf]`, non-empty name) and marked `noredact`;
//! everything else is replaced with its type's default. A surviving nested
//! record is redacted in turn, while a pruned one is defaulted as a whole:
//! `noredact` markings inside it are never consulted.
//!
//! ```
//! use clapconf::Conf;
//!
//! #[derive(Conf, Clone, Default, Debug, PartialEq)]
//! struct Login {
//!     #[conf(name = "name", noredact)]
//!     pub username: String,
//!     #[conf]
//!     pub password: String,
//! }
//!
//! let login = Login { username: "jdoe".into(), password: "secret".into() };
//! let safe = clapconf::redact(&login).unwrap();
//! assert_eq!(safe, Login { username: "jdoe".into(), password: String::new() });
//! assert_eq!(login.password, "secret");
//! ```

use crate::error::ConfError;
use crate::field::{Field, FieldMeta};

/// Build a redacted copy of `value`, which must be a record.
///
/// `value` is only read. Calling this on anything but a `#[derive(Conf)]`
/// type returns [`ConfError::NotARecord`].
pub fn redact<T: Field>(value: &T) -> Result<T, ConfError> {
    if !T::RECORD {
        return Err(ConfError::NotARecord { kind: T::KIND });
    }
    Ok(value.redacted())
}

/// The redacted value of one field, given its metadata.
///
/// Used by `#[derive(Conf)]`; kept fields are redacted recursively (records)
/// or cloned (everything else), other fields are defaulted without being
/// read.
#[doc(hidden)]
pub fn field<T: Field>(meta: &FieldMeta, value: &T) -> T {
    if meta.keeps_on_redact() {
        value.redacted()
    } else {
        T::default()
    }
}
