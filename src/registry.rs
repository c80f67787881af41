//! Option registry backed by [clap](https://docs.rs/clap).
//!
//! Entries are collected first and turned into a `clap::Command` only when
//! help is rendered or arguments are parsed, so that help text can still be
//! amended after registration. Each entry owns the `&mut` slot of the field it
//! was registered for; a value parsed from the command line is written
//! straight into the configuration record.
//!
//! Options are long flags (`--name value`, `--name=value`). For compatibility
//! with single-dash conventions, `-name` and `-name=value` are accepted for
//! every registered name and for `-help`.

use std::collections::HashMap;
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command, value_parser};

use crate::error::ConfError;
use crate::value::{Kind, Slot};

/// Names clap reserves for itself.
const RESERVED: &[&str] = &["help"];

/// Id of the trailing operand list. Option names cannot contain `=`, so it
/// never collides with one.
const OPERANDS: &str = "=operands";

/// One registered option.
#[derive(Debug)]
pub struct Entry<'a> {
    name: String,
    help: String,
    default: String,
    slot: Slot<'a>,
}

impl<'a> Entry<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The field's value at registration time, rendered.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    /// Append `text` to the help, separated by a space if help is non-empty.
    pub fn append_help(&mut self, text: &str) {
        if !self.help.is_empty() {
            self.help.push(' ');
        }
        self.help.push_str(text);
    }

    pub fn slot_mut(&mut self) -> &mut Slot<'a> {
        &mut self.slot
    }

    fn arg(&self) -> Arg {
        let kind = self.kind();
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.help.clone())
            .value_name(kind.name())
            .action(ArgAction::Set)
            .value_parser(move |raw: &str| kind.check(raw).map(|()| raw.to_owned()));

        arg = if kind == Kind::Bool {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.allow_hyphen_values(true)
        };

        // Zero values show no `[default: ...]`.
        if !self.slot.is_zero() {
            arg = arg.default_value(self.default.clone());
        }
        arg
    }
}

/// Typed option store for one program invocation.
#[derive(Debug)]
pub struct Registry<'a> {
    program: String,
    entries: Vec<Entry<'a>>,
}

impl<'a> Registry<'a> {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Register an option bound to `slot`, using the slot's current value as
    /// the default.
    pub fn register(&mut self, name: String, help: String, slot: Slot<'a>) -> Result<(), ConfError> {
        validate_name(&name)?;
        if self.entries.iter().any(|e| e.name == name) {
            return Err(ConfError::DuplicateOption(name));
        }
        let default = slot.render();
        self.entries.push(Entry {
            name,
            help,
            default,
            slot,
        });
        Ok(())
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Entry<'a>] {
        &mut self.entries
    }

    /// Build the clap command describing every registered option.
    pub fn command(&self) -> Command {
        self.entries.iter().fold(
            Command::new(self.program.clone()).args_override_self(true),
            |command, entry| command.arg(entry.arg()),
        )
    }

    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Parse `args` (including the program name in first position) and store
    /// every option given on the command line into its field. Options not
    /// given leave their fields alone.
    ///
    /// Option parsing stops at the first operand or at `--`. The operands
    /// from there on are returned, unparsed.
    pub fn parse<I, T>(&mut self, args: I) -> Result<Vec<OsString>, ConfError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let names: HashMap<&str, bool> = self
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.kind() != Kind::Bool))
            .collect();
        let args = normalize_args(args.into_iter().map(Into::into), &names);

        let mut command = self.command().arg(
            Arg::new(OPERANDS)
                .value_name("ARGS")
                .value_parser(value_parser!(OsString))
                .action(ArgAction::Append)
                .num_args(1..)
                .trailing_var_arg(true)
                .hide(true),
        );
        let matches = command.try_get_matches_from_mut(args)?;

        for entry in &mut self.entries {
            if matches.value_source(&entry.name) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(raw) = matches.get_one::<String>(&entry.name) else {
                continue;
            };
            if let Err(err) = entry.slot.set(raw) {
                return Err(command
                    .error(
                        ErrorKind::ValueValidation,
                        format!("invalid value {raw:?} for option --{}: {err}", entry.name),
                    )
                    .into());
            }
        }

        let operands: Vec<OsString> = matches
            .get_many::<OsString>(OPERANDS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(operands)
    }
}

fn validate_name(name: &str) -> Result<(), ConfError> {
    let reason = if name.is_empty() {
        "is empty"
    } else if name.starts_with('-') {
        "begins with -"
    } else if name.contains('=') {
        "contains ="
    } else if name.chars().any(char::is_whitespace) {
        "contains whitespace"
    } else if RESERVED.contains(&name) {
        "is reserved"
    } else {
        return Ok(());
    };
    Err(ConfError::InvalidOptionName {
        name: name.to_string(),
        reason,
    })
}

/// Rewrite single-dash long options (`-name`, `-name=value`) into the
/// double-dash form clap expects. Only registered names and `-help` are
/// rewritten, so short flags and negative numbers pass untouched.
///
/// `names` maps each option to whether it takes a separate value. Nothing is
/// rewritten from the first operand or a `--` terminator on.
fn normalize_args(
    args: impl Iterator<Item = OsString>,
    names: &HashMap<&str, bool>,
) -> Vec<OsString> {
    let mut out = Vec::new();
    let mut args = args;
    if let Some(program) = args.next() {
        out.push(program);
    }

    let mut terminated = false;
    let mut value_next = false;
    for arg in args {
        if terminated || std::mem::take(&mut value_next) {
            out.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            terminated = true;
            out.push(arg);
            continue;
        };
        if s == "--" {
            terminated = true;
            out.push(arg);
            continue;
        }
        let Some(body) = s.strip_prefix('-').filter(|body| !body.is_empty()) else {
            // First operand.
            terminated = true;
            out.push(arg);
            continue;
        };

        let double_dash = body.starts_with('-');
        let body = body.strip_prefix('-').unwrap_or(body);
        let (name, inline) = body.split_once('=').map_or((body, false), |(n, _)| (n, true));
        let known = names.get(name).copied();
        value_next = known == Some(true) && !inline;

        if !double_dash && (known.is_some() || name == "help") {
            out.push(format!("-{s}").into());
        } else {
            out.push(arg);
        }
    }
    out
}
