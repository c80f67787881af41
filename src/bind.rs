//! Turns a record's leaves into registry options.

use serde::Serialize;

use crate::env;
use crate::error::ConfError;
use crate::field::Conf;
use crate::registry::Registry;
use crate::value::Kind;
use crate::walk::walk;

/// Register one option per bindable leaf of `config`.
///
/// The option's default is the field's current value and its help is the
/// field's usage text. Each option keeps the field's slot, so parsing writes
/// into `config` directly.
pub fn bind<'a>(config: &'a mut dyn Conf, registry: &mut Registry<'a>) -> Result<(), ConfError> {
    for leaf in walk(config) {
        registry.register(leaf.path, leaf.meta.usage.to_string(), leaf.slot)?;
    }
    tracing::debug!(
        program = registry.program(),
        options = registry.entries().len(),
        "options bound"
    );
    Ok(())
}

/// A bound option as seen from outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    pub name: String,
    pub usage: String,
    pub default: String,
    pub env_var: String,
    pub kind: Kind,
}

/// Describe every option in `registry`, in registration order.
pub fn describe(registry: &Registry<'_>) -> Vec<OptionInfo> {
    registry
        .entries()
        .iter()
        .map(|entry| OptionInfo {
            name: entry.name().to_string(),
            usage: entry.help().to_string(),
            default: entry.default_value().to_string(),
            env_var: env::env_var_name(registry.program(), entry.name()),
            kind: entry.kind(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldMeta;
    use crate::field::Shape;
    use crate::fixtures::test::{Clash, Config};

    fn option<'r>(options: &'r [OptionInfo], name: &str) -> &'r OptionInfo {
        options
            .iter()
            .find(|o| o.name == name)
            .unwrap_or_else(|| panic!("no option {name}"))
    }

    #[test]
    fn binds_every_leaf_with_defaults() {
        let mut config = Config::fixture();
        let mut registry = Registry::new("cmd");
        bind(&mut config, &mut registry).unwrap();
        let options = describe(&registry);

        assert_eq!(options.len(), 11);
        let int = option(&options, "Int");
        assert_eq!(int.usage, "hello world");
        assert_eq!(int.default, "3");
        assert_eq!(int.kind, Kind::Isize);
        assert_eq!(int.env_var, "CMD_INT");

        assert_eq!(option(&options, "SubConfig-String").default, "a");
        assert_eq!(option(&options, "Duration").default, "0s");
        assert_eq!(option(&options, "Bool").default, "false");
        assert_eq!(option(&options, "Float64").default, "0");
        assert_eq!(
            option(&options, "sub-config-custom-name-xxx-String").env_var,
            "CMD_SUB_CONFIG_CUSTOM_NAME_XXX_STRING"
        );
    }

    #[test]
    fn colliding_paths_are_rejected() {
        let mut config = Clash::default();
        let mut registry = Registry::new("cmd");
        let err = bind(&mut config, &mut registry).unwrap_err();
        assert!(matches!(err, ConfError::DuplicateOption(ref n) if n == "a-b"));
        assert!(err.is_author_error());
    }

    struct BadName {
        value: i64,
    }

    impl Conf for BadName {
        fn fields(&self) -> &'static [FieldMeta] {
            const FIELDS: &[FieldMeta] = &[FieldMeta {
                ident: "value",
                name: "has space",
                usage: "",
                noredact: false,
                exported: true,
                tagged: true,
            }];
            FIELDS
        }

        fn fields_mut(&mut self) -> Vec<(&'static FieldMeta, Shape<'_>)> {
            let fields = Conf::fields(self);
            vec![(&fields[0], crate::Field::shape(&mut self.value))]
        }
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut config = BadName { value: 0 };
        let mut registry = Registry::new("cmd");
        let err = bind(&mut config, &mut registry).unwrap_err();
        assert!(matches!(
            err,
            ConfError::InvalidOptionName { reason: "contains whitespace", .. }
        ));
    }

    #[test]
    fn option_info_serializes() {
        let info = OptionInfo {
            name: "timeout".into(),
            usage: "(env var APP_TIMEOUT)".into(),
            default: "30s".into(),
            env_var: "APP_TIMEOUT".into(),
            kind: Kind::Duration,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "timeout",
                "usage": "(env var APP_TIMEOUT)",
                "default": "30s",
                "env_var": "APP_TIMEOUT",
                "kind": "duration",
            })
        );
    }
}
