use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::attrs::FieldSpec;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Conf requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Conf can only be derived for structs",
            ));
        }
    };

    let specs = fields
        .iter()
        .map(FieldSpec::from_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let metas = specs.iter().map(|spec| {
        let ident = spec.ident.to_string();
        let FieldSpec {
            name,
            usage,
            noredact,
            exported,
            tagged,
            ..
        } = spec;
        quote! {
            ::clapconf::FieldMeta {
                ident: #ident,
                name: #name,
                usage: #usage,
                noredact: #noredact,
                exported: #exported,
                tagged: #tagged,
            }
        }
    });

    let shapes = specs.iter().enumerate().map(|(idx, spec)| {
        let field = &spec.ident;
        if spec.participates() {
            quote! { (&__fields[#idx], ::clapconf::Field::shape(&mut self.#field)) }
        } else {
            quote! { (&__fields[#idx], ::clapconf::Shape::Opaque) }
        }
    });

    let redacted = specs.iter().enumerate().map(|(idx, spec)| {
        let field = &spec.ident;
        if spec.participates() {
            quote! { #field: ::clapconf::redact::field(&__fields[#idx], &self.#field) }
        } else {
            quote! { #field: ::core::default::Default::default() }
        }
    });

    Ok(quote! {
        impl #impl_generics ::clapconf::Conf for #ident #ty_generics #where_clause {
            fn fields(&self) -> &'static [::clapconf::FieldMeta] {
                const FIELDS: &[::clapconf::FieldMeta] = &[#(#metas),*];
                FIELDS
            }

            fn fields_mut(
                &mut self,
            ) -> ::std::vec::Vec<(&'static ::clapconf::FieldMeta, ::clapconf::Shape<'_>)> {
                #[allow(unused_variables)]
                let __fields = ::clapconf::Conf::fields(self);
                ::std::vec![#(#shapes),*]
            }
        }

        impl #impl_generics ::clapconf::Field for #ident #ty_generics #where_clause {
            const KIND: &'static str = "struct";
            const RECORD: bool = true;

            fn shape(&mut self) -> ::clapconf::Shape<'_> {
                ::clapconf::Shape::Record(self)
            }

            fn redacted(&self) -> Self {
                #[allow(unused_variables)]
                let __fields = ::clapconf::Conf::fields(self);
                Self {
                    #(#redacted),*
                }
            }
        }
    })
}
