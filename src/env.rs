use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::path::Path;

use crate::case::screaming_snake;
use crate::error::ConfError;
use crate::registry::Registry;

/// Read-only access to environment variables.
///
/// Production code uses [`ProcessEnv`]; tests pass a map so they never touch
/// the real process environment.
pub trait Environment {
    /// Value of `name`, or `None` if it is unset.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        // Non-UTF-8 values are read lossily rather than treated as unset.
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Last path component of `program`, or `program` itself if it has none.
pub fn base_name(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
}

/// Environment variable consulted for `option` of `program`.
///
/// ```
/// assert_eq!(
///     clapconf::env_var_name("/usr/bin/cmd", "SubConfig-String"),
///     "CMD_SUB_CONFIG_STRING"
/// );
/// ```
pub fn env_var_name(program: &str, option: &str) -> String {
    screaming_snake(&format!("{}_{option}", base_name(program)))
}

/// Append `(env var NAME)` to the help of every registered option.
pub fn annotate(registry: &mut Registry<'_>) {
    let program = registry.program().to_string();
    for entry in registry.entries_mut() {
        let var = env_var_name(&program, entry.name());
        entry.append_help(&format!("(env var {var})"));
    }
}

/// Store the value of every set environment variable into its option's
/// field, in registration order.
///
/// Stops at the first value that does not parse; fields of later options
/// are left untouched.
pub fn apply(registry: &mut Registry<'_>, env: &impl Environment) -> Result<(), ConfError> {
    let program = registry.program().to_string();
    let mut applied = 0usize;

    for entry in registry.entries_mut() {
        let var = env_var_name(&program, entry.name());
        let Some(raw) = env.lookup(&var) else {
            continue;
        };
        if let Err(source) = entry.slot_mut().set(&raw) {
            return Err(ConfError::InvalidEnvironmentValue {
                env_var: var,
                raw,
                source,
            });
        }
        // The value may be a secret; only the name is logged.
        tracing::debug!(env_var = %var, option = entry.name(), "applied environment variable");
        applied += 1;
    }

    tracing::debug!(applied, "environment applied");
    Ok(())
}
