//! Derive macro implementation for layerconf

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Return `T` if `ty` is `Option<T>`
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    match &seg.arguments {
        syn::PathArguments::AngleBracketed(args) => match args.args.first()? {
            syn::GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// `LayerConf` derive macro
///
/// Implements `from_provider(&dyn layerconf::Provider)` on structs.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[conf(prefix = "PREFIX_")]`: Add prefix to all keys
///
/// **Field-level**:
/// - `#[conf(name = "CUSTOM_NAME")]`: Custom key
/// - `#[conf(default)]`: Use `Default::default()` if the key is missing
/// - `#[conf(default = value)]`: Use explicit default value if the key is missing
/// - `#[conf(deserializer = "func")]`: Use custom deserializer function
///
/// # Example
///
/// See the `layerconf` crate documentation for usage examples.
#[proc_macro_derive(LayerConf, attributes(conf))]
pub fn derive_layerconf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "LayerConf only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "LayerConf only supports structs",
            ));
        }
    };

    let mut field_initializers = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;
        let option_inner = option_inner_type(field_type);

        let base_name = attrs
            .name
            .unwrap_or_else(|| field_name.to_string().to_uppercase());
        let key = format!("{}{}", struct_attrs.prefix, base_name);

        if option_inner.is_some() && attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Option<T> fields cannot have default attribute (they default to None automatically)",
            ));
        }

        let load_expr = match (attrs.deserializer, option_inner) {
            (Some(func), _) if attrs.default.is_some() => {
                return Err(syn::Error::new_spanned(
                    func,
                    "default value is not supported with deserializer attribute",
                ));
            }
            (Some(func), Some(_)) => quote! {
                ::layerconf::de::deserialize_optional_with(__provider, #key, #func)?
            },
            (Some(func), None) => quote! {
                ::layerconf::de::deserialize_with(__provider, #key, #func)?
            },
            (None, Some(inner_type)) => quote! {
                ::layerconf::de::deserialize_optional::<#inner_type>(__provider, #key)?
            },
            (None, None) => match attrs.default {
                Some(Some(default_value)) => quote! {
                    ::layerconf::de::deserialize_with_default::<#field_type>(
                        __provider,
                        #key,
                        #default_value
                    )?
                },
                Some(None) => quote! {
                    ::layerconf::de::deserialize_with_default::<#field_type>(
                        __provider,
                        #key,
                        ::core::default::Default::default()
                    )?
                },
                None => quote! {
                    ::layerconf::de::deserialize_required::<#field_type>(__provider, #key)?
                },
            },
        };

        field_initializers.push(quote! {
            #field_name: #load_expr
        });
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Load configuration from a provider
            ///
            /// # Errors
            ///
            /// - A required key is missing from the provider
            /// - A value cannot be converted into the field's type
            /// - The provider failed to load its backing source
            pub fn from_provider(
                __provider: &dyn ::layerconf::Provider,
            ) -> ::layerconf::Result<Self> {
                Ok(Self {
                    #(#field_initializers),*
                })
            }
        }
    })
}
