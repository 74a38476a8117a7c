//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from the
//! struct and its fields during macro expansion.

use syn::{Attribute, Field, LitStr};

/// Parsed struct-level `#[conf(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix prepended to every field's key.
    pub prefix: String,
}

impl StructAttrs {
    /// Extract `#[conf(prefix = "...")]` from the struct's attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let s: LitStr = meta.value()?.parse()?;
                    parsed.prefix = s.value();
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level conf attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed field-level `#[conf(...)]` attributes.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Key override.
    ///
    /// If `None`, the field name is upper-cased.
    pub name: Option<String>,

    /// Default value strategy:
    /// - `None`: Field is required (no default)
    /// - `Some(None)`: Use `Default::default()`
    /// - `Some(Some(tokens))`: Use explicit token stream as default value
    pub default: Option<Option<proc_macro2::TokenStream>>,

    /// Custom deserializer function path (e.g., `"parse_list"`).
    ///
    /// When specified, the value is read as a string and passed to this function.
    pub deserializer: Option<syn::Path>,
}

impl FieldAttrs {
    /// Extract and parse `#[conf(...)]` attributes from a struct field.
    ///
    /// Attributes other than `conf` are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let s: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(s.value());
                    return Ok(());
                }

                // default or default = value
                if meta.path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        let expr: syn::Expr = value.parse()?;
                        attrs.default = Some(Some(quote::quote!(#expr)));
                    } else {
                        attrs.default = Some(None);
                    }
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let s: LitStr = meta.value()?.parse()?;
                    attrs.deserializer = Some(s.parse()?);
                    return Ok(());
                }

                Err(meta.error("unsupported conf attribute"))
            })?;
        }

        Ok(attrs)
    }
}
