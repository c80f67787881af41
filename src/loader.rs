use std::ffi::OsString;

use crate::bind::{self, OptionInfo};
use crate::env::{self, Environment, ProcessEnv};
use crate::error::ConfError;
use crate::field::Conf;
use crate::registry::Registry;

/// Load `config` from the process arguments and environment, returning the
/// operands that follow the options.
///
/// Shorthand for `Loader::new().load(config)`.
pub fn load<C: Conf>(config: &mut C) -> Result<Vec<OsString>, ConfError> {
    Loader::new().load(config)
}

/// Builder for loading a configuration record.
///
/// Defaults to the real process: arguments from [`std::env::args_os`] and
/// variables from [`ProcessEnv`]. Tests replace both.
///
/// ```
/// use std::collections::HashMap;
/// use clapconf::{Conf, Loader};
///
/// #[derive(Conf, Clone, Default, Debug)]
/// struct Login {
///     #[conf(name = "name", noredact)]
///     pub username: String,
///     #[conf]
///     pub password: String,
/// }
///
/// let mut login = Login { username: "jdoe".into(), ..Login::default() };
/// let env = HashMap::from([("PROG_PASSWORD".to_string(), "yyy".to_string())]);
/// let operands = Loader::new()
///     .args(["prog", "-name=xxx", "input.txt"])
///     .env(env)
///     .load(&mut login)
///     .unwrap();
/// assert_eq!(operands, [std::ffi::OsString::from("input.txt")]);
/// assert_eq!(login.username, "xxx");
/// assert_eq!(login.password, "yyy");
/// ```
#[derive(Debug, Clone)]
pub struct Loader<E = ProcessEnv> {
    program_name: Option<String>,
    args: Option<Vec<OsString>>,
    env: E,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            program_name: None,
            args: None,
            env: ProcessEnv,
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> Loader<E> {
    /// Set the program name (default: the first argument). Only its last
    /// path component is used, both in help and as the environment variable
    /// prefix.
    pub fn program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    /// Replace the process arguments. The first item is the program name,
    /// as in [`std::env::args_os`].
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the environment variables are read from.
    pub fn env<F: Environment>(self, env: F) -> Loader<F> {
        Loader {
            program_name: self.program_name,
            args: self.args,
            env,
        }
    }

    /// List the options `config` binds to, with their defaults and variable
    /// names. Neither arguments nor environment are read, and `config` is
    /// left unchanged.
    pub fn options<C: Conf>(&self, config: &mut C) -> Result<Vec<OptionInfo>, ConfError> {
        let args = self.effective_args();
        let registry = self.prepare(config, &args)?;
        Ok(bind::describe(&registry))
    }

    /// Render the help text for `config`.
    pub fn render_help<C: Conf>(&self, config: &mut C) -> Result<String, ConfError> {
        let args = self.effective_args();
        let registry = self.prepare(config, &args)?;
        Ok(registry.render_help())
    }

    /// Populate `config` from the environment and then the arguments.
    ///
    /// The current field values act as defaults. A value from the
    /// environment overrides a default, and a command-line value overrides
    /// both. On error `config` may be partially updated.
    ///
    /// Options end at the first argument that is not one (or at `--`); that
    /// argument and everything after it are returned as operands.
    pub fn load<C: Conf>(&self, config: &mut C) -> Result<Vec<OsString>, ConfError> {
        let args = self.effective_args();
        let mut registry = self.prepare(config, &args)?;
        env::apply(&mut registry, &self.env)?;
        let operands = registry.parse(args)?;
        tracing::debug!(
            program = registry.program(),
            operands = operands.len(),
            "arguments parsed"
        );
        Ok(operands)
    }

    /// Like [`load`](Self::load), but reports errors and exits the process.
    ///
    /// Help requests print the help and exit with status 0. Invalid
    /// arguments and environment values exit with status 2, the latter
    /// followed by the help text. Errors in the configuration type itself
    /// exit with status 1. On success the operands are returned.
    pub fn load_or_exit<C: Conf>(&self, config: &mut C) -> Vec<OsString> {
        let args = self.effective_args();
        let mut registry = match self.prepare(config, &args) {
            Ok(registry) => registry,
            Err(err) => exit(err, None),
        };
        if let Err(err) = env::apply(&mut registry, &self.env) {
            let usage = registry.render_help();
            exit(err, Some(usage));
        }
        match registry.parse(args) {
            Ok(operands) => operands,
            Err(err) => exit(err, None),
        }
    }

    fn effective_args(&self) -> Vec<OsString> {
        self.args
            .clone()
            .unwrap_or_else(|| std::env::args_os().collect())
    }

    fn effective_program_name(&self, args: &[OsString]) -> String {
        let program = match &self.program_name {
            Some(name) => name.clone(),
            None => args
                .first()
                .map(|arg| arg.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        env::base_name(&program).to_string()
    }

    /// Bind `config` and annotate the help of every option.
    fn prepare<'a>(
        &self,
        config: &'a mut dyn Conf,
        args: &[OsString],
    ) -> Result<Registry<'a>, ConfError> {
        let mut registry = Registry::new(&self.effective_program_name(args));
        bind::bind(config, &mut registry)?;
        env::annotate(&mut registry);
        Ok(registry)
    }
}

fn exit(err: ConfError, usage: Option<String>) -> ! {
    match err {
        ConfError::InvalidArgumentValue(err) => err.exit(),
        err => {
            eprintln!("error: {err}");
            if let Some(usage) = usage {
                eprintln!();
                eprint!("{usage}");
            }
            std::process::exit(if err.is_operator_error() { 2 } else { 1 })
        }
    }
}
