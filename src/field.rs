//! The field table every bindable record exposes, and the per-type behaviour
//! the walks rely on.
//!
//! `#[derive(Conf)]` implements both traits for a struct. [`Field`] is also
//! implemented here for the supported primitives (which bind to a [`Slot`])
//! and for common container types, which are carried through redaction but
//! never bound.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::value::Slot;

/// Compile-time description of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// The Rust identifier of the field.
    pub ident: &'static str,
    /// Exposed option name. Empty means the field is excluded.
    pub name: &'static str,
    /// Help text for the generated option.
    pub usage: &'static str,
    /// Whether redaction keeps this field.
    pub noredact: bool,
    /// Whether the field is `pub` (any visibility qualifier counts).
    pub exported: bool,
    /// Whether the field carries a `#[conf]` attribute.
    pub tagged: bool,
}

impl FieldMeta {
    /// True if the field takes part in binding at all.
    pub fn is_bound(&self) -> bool {
        self.exported && self.tagged && !self.name.is_empty()
    }

    /// True if redaction copies (or descends into) the field.
    pub fn keeps_on_redact(&self) -> bool {
        self.is_bound() && self.noredact
    }
}

/// Mutable view of a field's storage, as seen by the binding walk.
pub enum Shape<'a> {
    /// A nested record; the walk descends into it.
    Record(&'a mut dyn Conf),
    /// A supported primitive; becomes one option.
    Primitive(Slot<'a>),
    /// Anything else. Skipped when binding.
    Opaque,
}

/// A record whose fields can be bound and redacted.
///
/// Implemented by `#[derive(Conf)]`; writing it by hand is possible but the
/// two methods must agree on field order.
pub trait Conf {
    /// Every field of the record, in declaration order.
    fn fields(&self) -> &'static [FieldMeta];

    /// Every field paired with a view of its storage, in declaration order.
    fn fields_mut(&mut self) -> Vec<(&'static FieldMeta, Shape<'_>)>;
}

/// Per-type behaviour for anything that may appear as a field of a record.
///
/// Types without a binding (`Vec`, maps, user types) only need
/// `impl Field for MyType {}`: they are then skipped by binding and cloned
/// by redaction when marked `noredact`.
pub trait Field: Clone + Default {
    /// Short kind name used in diagnostics.
    const KIND: &'static str = "opaque";
    /// Whether this type is a record.
    const RECORD: bool = false;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Opaque
    }

    /// The copy placed in a redacted record when this field is kept.
    fn redacted(&self) -> Self {
        self.clone()
    }
}

impl Field for bool {
    const KIND: &'static str = "bool";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::Bool(self))
    }
}

impl Field for i32 {
    const KIND: &'static str = "i32";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::I32(self))
    }
}

impl Field for i64 {
    const KIND: &'static str = "i64";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::I64(self))
    }
}

impl Field for isize {
    const KIND: &'static str = "isize";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::Isize(self))
    }
}

impl Field for u16 {
    const KIND: &'static str = "u16";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::U16(self))
    }
}

impl Field for u32 {
    const KIND: &'static str = "u32";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::U32(self))
    }
}

impl Field for u64 {
    const KIND: &'static str = "u64";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::U64(self))
    }
}

impl Field for usize {
    const KIND: &'static str = "usize";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::Usize(self))
    }
}

impl Field for f64 {
    const KIND: &'static str = "f64";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::F64(self))
    }
}

impl Field for String {
    const KIND: &'static str = "String";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::String(self))
    }
}

impl Field for Duration {
    const KIND: &'static str = "Duration";

    fn shape(&mut self) -> Shape<'_> {
        Shape::Primitive(Slot::Duration(self))
    }
}

macro_rules! opaque_field {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Field for $ty {
                const KIND: &'static str = $kind;
            }
        )*
    };
}

opaque_field! {
    i8 => "i8",
    i16 => "i16",
    i128 => "i128",
    u8 => "u8",
    u128 => "u128",
    f32 => "f32",
    char => "char",
    () => "unit",
    PathBuf => "PathBuf",
}

impl<T: Clone> Field for Vec<T> {
    const KIND: &'static str = "Vec";
}

impl<T: Clone> Field for Option<T> {
    const KIND: &'static str = "Option";
}

impl<T: Clone + Default> Field for Box<T> {
    const KIND: &'static str = "Box";
}

impl<T: Default> Field for Arc<T> {
    const KIND: &'static str = "Arc";
}

impl<K: Clone, V: Clone, S: Clone + Default + BuildHasher> Field for HashMap<K, V, S> {
    const KIND: &'static str = "HashMap";
}

impl<T: Clone, S: Clone + Default + BuildHasher> Field for HashSet<T, S> {
    const KIND: &'static str = "HashSet";
}

impl<K: Clone, V: Clone> Field for BTreeMap<K, V> {
    const KIND: &'static str = "BTreeMap";
}

impl<T: Clone> Field for BTreeSet<T> {
    const KIND: &'static str = "BTreeSet";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Config, SubConfig};
    use crate::value::Kind;

    #[test]
    fn field_table_lists_every_field_in_order() {
        let config = Config::default();
        let idents: Vec<&str> = config.fields().iter().map(|f| f.ident).collect();
        assert_eq!(
            idents,
            [
                "bool_field",
                "duration",
                "float64",
                "int",
                "int64",
                "string",
                "uint",
                "uint64",
                "sub_config",
                "string_custom_name",
                "sub_config_custom_name",
                "skip_me",
                "unexported",
                "hidden",
                "hidden_sub_config",
            ]
        );
    }

    #[test]
    fn meta_reflects_attributes() {
        let config = Config::default();
        let fields = config.fields();

        let int = fields.iter().find(|f| f.ident == "int").unwrap();
        assert_eq!(int.name, "Int");
        assert_eq!(int.usage, "hello world");
        assert!(int.is_bound());

        let skip = fields.iter().find(|f| f.ident == "skip_me").unwrap();
        assert!(!skip.tagged);
        assert!(!skip.is_bound());

        let private = fields.iter().find(|f| f.ident == "unexported").unwrap();
        assert!(private.tagged);
        assert!(!private.exported);
        assert!(!private.is_bound());

        let hidden = fields.iter().find(|f| f.ident == "hidden_sub_config").unwrap();
        assert!(hidden.tagged && hidden.exported && hidden.noredact);
        assert!(!hidden.is_bound());
        assert!(!hidden.keeps_on_redact());
    }

    #[test]
    fn fields_mut_pairs_meta_with_shapes() {
        let mut config = Config::default();
        let shapes = config.fields_mut();
        assert_eq!(shapes.len(), 15);

        let kinds: Vec<Option<Kind>> = shapes
            .iter()
            .map(|(_, shape)| match shape {
                Shape::Primitive(slot) => Some(slot.kind()),
                _ => None,
            })
            .collect();
        assert_eq!(kinds[0], Some(Kind::Bool));
        assert_eq!(kinds[1], Some(Kind::Duration));
        assert!(matches!(shapes[8].1, Shape::Record(_)));
        assert!(matches!(shapes[11].1, Shape::Opaque));
        assert!(matches!(shapes[12].1, Shape::Opaque));
        assert!(matches!(shapes[13].1, Shape::Opaque));
        assert!(matches!(shapes[14].1, Shape::Opaque));
    }

    #[test]
    fn record_shape_writes_through() {
        let mut sub = SubConfig::default();
        if let Shape::Record(record) = sub.shape() {
            for (_, shape) in record.fields_mut() {
                if let Shape::Primitive(mut slot) = shape {
                    slot.set("written").unwrap();
                }
            }
        }
        assert_eq!(sub.string, "written");
    }

    #[test]
    fn kind_constants() {
        assert_eq!(<i64 as Field>::KIND, "i64");
        assert!(!<i64 as Field>::RECORD);
        assert_eq!(<Vec<u8> as Field>::KIND, "Vec");
        assert_eq!(<Config as Field>::KIND, "struct");
        assert!(<Config as Field>::RECORD);
    }

    #[test]
    fn meta_keep_requires_binding() {
        let meta = FieldMeta {
            ident: "s",
            name: "",
            usage: "",
            noredact: true,
            exported: true,
            tagged: true,
        };
        assert!(!meta.keeps_on_redact());
        let named = FieldMeta { name: "s", ..meta };
        assert!(named.keeps_on_redact());
    }
}
