//! Parsing of `#[conf(...)]` field attributes.

use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, Field, Lit, LitStr, Meta, Visibility};

/// Everything the derive needs to know about one named field.
pub(crate) struct FieldSpec {
    pub ident: syn::Ident,
    /// Exposed option name. Empty when the field is excluded.
    pub name: String,
    pub usage: String,
    pub noredact: bool,
    pub exported: bool,
    pub tagged: bool,
}

impl FieldSpec {
    pub(crate) fn from_field(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Conf requires named fields"))?;

        let mut spec = FieldSpec {
            name: String::new(),
            usage: String::new(),
            noredact: false,
            exported: !matches!(field.vis, Visibility::Inherited),
            tagged: false,
            ident,
        };

        let mut name: Option<String> = None;
        let mut usage: Option<String> = None;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("conf")) {
            spec.tagged = true;
            match &attr.meta {
                Meta::Path(_) => {}
                Meta::List(_) => attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        name = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("usage") {
                        usage = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("noredact") {
                        spec.noredact = true;
                    } else {
                        return Err(meta.error("unsupported conf attribute, expected `name`, `usage` or `noredact`"));
                    }
                    Ok(())
                })?,
                Meta::NameValue(nv) => {
                    return Err(syn::Error::new_spanned(
                        nv,
                        "expected `#[conf]` or `#[conf(...)]`",
                    ));
                }
            }
        }

        if spec.tagged {
            spec.name = name.unwrap_or_else(|| spec.ident.unraw().to_string());
            spec.usage = usage.unwrap_or_else(|| doc_summary(&field.attrs));
        }
        Ok(spec)
    }

    /// Whether the generated code touches the field through `clapconf::Field`.
    pub(crate) fn participates(&self) -> bool {
        self.exported && self.tagged && !self.name.is_empty()
    }
}

/// First paragraph of the `///` doc comment, joined into one line.
fn doc_summary(attrs: &[Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("doc")) {
        let Meta::NameValue(nv) = &attr.meta else {
            continue;
        };
        let Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) = &nv.value
        else {
            continue;
        };
        let line = s.value();
        let line = line.trim();
        if line.is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }
        lines.push(line.to_string());
    }
    lines.join(" ")
}
