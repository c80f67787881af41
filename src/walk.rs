//! Depth-first walk of a record's bindable fields.
//!
//! Nested records contribute their own fields under the parent's exposed
//! name, joined with `-`: `SubConfig { String }` yields `SubConfig-String`.

use crate::field::{Conf, FieldMeta, Shape};
use crate::value::Slot;

/// A bindable primitive reached by the walk.
#[derive(Debug)]
pub struct Leaf<'a> {
    /// Option path, e.g. `SubConfig-String`.
    pub path: String,
    pub meta: &'static FieldMeta,
    pub slot: Slot<'a>,
}

/// Collect every bindable primitive of `config` in declaration order,
/// descending into nested records.
///
/// Fields that are private, untagged, named `""`, or of an unsupported type
/// are skipped, as is everything below them.
pub fn walk<'a>(config: &'a mut dyn Conf) -> Vec<Leaf<'a>> {
    let mut leaves = Vec::new();
    collect(config, "", &mut leaves);
    leaves
}

fn collect<'a>(config: &'a mut dyn Conf, prefix: &str, leaves: &mut Vec<Leaf<'a>>) {
    for (meta, shape) in config.fields_mut() {
        if !meta.is_bound() {
            tracing::trace!(field = meta.ident, "skipping unbound field");
            continue;
        }
        let path = join(prefix, meta.name);
        match shape {
            Shape::Record(record) => collect(record, &path, leaves),
            Shape::Primitive(slot) => leaves.push(Leaf { path, meta, slot }),
            Shape::Opaque => tracing::trace!(%path, "skipping field of unsupported type"),
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}-{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Config, Database, Login};
    use crate::value::Kind;

    #[test]
    fn paths_follow_declaration_order() {
        let mut config = Config::default();
        let paths: Vec<String> = walk(&mut config).into_iter().map(|l| l.path).collect();
        assert_eq!(
            paths,
            [
                "Bool",
                "Duration",
                "Float64",
                "Int",
                "Int64",
                "String",
                "Uint",
                "Uint64",
                "SubConfig-String",
                "string-custom-name-xxx",
                "sub-config-custom-name-xxx-String",
            ]
        );
    }

    #[test]
    fn leaves_write_through_to_nested_records() {
        let mut config = Config::default();
        for mut leaf in walk(&mut config) {
            if leaf.slot.kind() == Kind::String {
                leaf.slot.set(&leaf.path).unwrap();
            }
        }
        assert_eq!(config.string, "String");
        assert_eq!(config.sub_config.string, "SubConfig-String");
        assert_eq!(
            config.sub_config_custom_name.string,
            "sub-config-custom-name-xxx-String"
        );
        assert_eq!(config.skip_me, "");
        assert_eq!(config.hidden, "");
        assert_eq!(config.hidden_sub_config.string, "");
    }

    #[test]
    fn empty_names_are_not_walked() {
        let mut config = Config::default();
        let leaves = walk(&mut config);
        assert!(
            leaves
                .iter()
                .all(|l| !l.path.is_empty() && !l.path.starts_with('-'))
        );
        assert!(!leaves.iter().any(|l| l.meta.ident.starts_with("hidden")));
    }

    #[test]
    fn repeated_records_get_distinct_prefixes() {
        let mut config = Database::default();
        let paths: Vec<String> = walk(&mut config).into_iter().map(|l| l.path).collect();
        assert_eq!(
            paths,
            [
                "primary-db-dsn",
                "primary-db-timeout",
                "secondary-db-dsn",
                "secondary-db-timeout",
            ]
        );
    }

    #[test]
    fn leaf_meta_carries_usage() {
        let mut config = Login::default();
        let leaves = walk(&mut config);
        assert_eq!(leaves[0].path, "name");
        assert_eq!(leaves[0].meta.usage, "who to log in as");
        assert_eq!(leaves[1].path, "password");
    }

    #[test]
    fn join_paths() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a", "b"), "a-b");
        assert_eq!(join("a-b", "c"), "a-b-c");
    }
}
