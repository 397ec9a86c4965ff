// File: rusty-formmap-derive/src/record.rs
// Purpose: #[formmap] attribute parsing and record trait generation

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_quote, Data, DeriveInput, Fields, FieldsNamed, Generics, Ident, LitStr, Type};

/// Field name that marks a field as excluded from mapping
const EXCLUDED: &str = "-";

/// Options parsed from `#[formmap(...)]` on a single field
#[derive(Debug, Default, PartialEq)]
pub struct FieldOptions {
    pub rename: Option<String>,
    pub skip: bool,
}

/// Parse `#[formmap(rename = "...", skip)]` attributes from a field
pub fn extract_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("formmap") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported formmap attribute, expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }

    Ok(options)
}

/// A struct field that takes part in mapping, with its path segment name
struct MappedField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
}

fn named_fields<'a>(input: &'a DeriveInput, derive_name: &str) -> syn::Result<&'a FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                format!("{} only supports structs with named fields", derive_name),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{} only supports structs", derive_name),
        )),
    }
}

fn mapped_fields<'a>(input: &'a DeriveInput, derive_name: &str) -> syn::Result<Vec<MappedField<'a>>> {
    let mut mapped = Vec::new();

    for field in &named_fields(input, derive_name)?.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let options = extract_field_options(&field.attrs)?;
        let name = options.rename.unwrap_or_else(|| ident.unraw().to_string());

        if options.skip || name == EXCLUDED {
            continue;
        }

        mapped.push(MappedField {
            ident,
            ty: &field.ty,
            name,
        });
    }

    Ok(mapped)
}

/// Add `bound` to every type parameter of the deriving struct
fn add_trait_bounds(mut generics: Generics, bound: syn::Path) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#bound));
    }
    generics
}

/// Require `bound` of every mapped field type. Container impls such as
/// `Vec<T>: FormValue` carry their own bounds on `T`, so a bound on `T`
/// alone is not enough.
fn add_field_bounds(mut generics: Generics, fields: &[MappedField<'_>], bound: syn::Path) -> Generics {
    if generics.type_params().next().is_none() {
        return generics;
    }

    let where_clause = generics.make_where_clause();
    for field in fields {
        let ty = field.ty;
        where_clause.predicates.push(parse_quote!(#ty: #bound));
    }
    generics
}

/// Generate `DomainRecord` + `DomainValue` for a struct
pub fn impl_domain_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let fields = mapped_fields(input, "DomainRecord")?;

    let generics = add_trait_bounds(input.generics.clone(), parse_quote!(::rusty_formmap::DomainValue));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let entries = fields.iter().map(|field| {
        let ident = field.ident;
        let field_name = &field.name;
        quote! {
            (#field_name, &self.#ident as &dyn ::rusty_formmap::DomainValue)
        }
    });

    let zero_checks = fields.iter().map(|field| {
        let ident = field.ident;
        quote! {
            ::rusty_formmap::DomainValue::is_zero(&self.#ident)
        }
    });

    Ok(quote! {
        impl #impl_generics ::rusty_formmap::DomainRecord for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<(&'static str, &dyn ::rusty_formmap::DomainValue)> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics ::rusty_formmap::DomainValue for #name #ty_generics #where_clause {
            fn node(&self) -> ::rusty_formmap::DomainNode<'_> {
                ::rusty_formmap::DomainNode::Record(self)
            }

            fn is_zero(&self) -> bool {
                true #(&& #zero_checks)*
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    })
}

/// Generate `FormRecord` + `FormValue` for a struct
pub fn impl_form_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let fields = mapped_fields(input, "FormRecord")?;

    let generics = add_trait_bounds(input.generics.clone(), parse_quote!(::rusty_formmap::FormValue));
    let generics = add_field_bounds(generics, &fields, parse_quote!(::rusty_formmap::FormValue));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let field_names: Vec<&String> = fields.iter().map(|field| &field.name).collect();

    let match_arms = fields.iter().map(|field| {
        let ident = field.ident;
        let field_name = &field.name;
        quote! {
            #field_name => ::std::option::Option::Some(&mut self.#ident as &mut dyn ::rusty_formmap::FormValue),
        }
    });

    Ok(quote! {
        impl #impl_generics ::rusty_formmap::FormRecord for #name #ty_generics #where_clause {
            fn field_mut(&mut self, name: &str) -> ::std::option::Option<&mut dyn ::rusty_formmap::FormValue> {
                match name {
                    #(#match_arms)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_names(&self) -> &'static [&'static str] {
                &[#(#field_names),*]
            }
        }

        impl #impl_generics ::rusty_formmap::FormValue for #name #ty_generics #where_clause {
            fn node_mut(&mut self) -> ::rusty_formmap::FormNode<'_> {
                ::rusty_formmap::FormNode::Record(self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_field_options() {
        let field: syn::Field = parse_quote! {
            #[formmap(rename = "sku")]
            stock_keeping_unit: String
        };
        let options = extract_field_options(&field.attrs).unwrap();
        assert_eq!(
            options,
            FieldOptions {
                rename: Some("sku".to_string()),
                skip: false
            }
        );

        let field: syn::Field = parse_quote! {
            #[serde(default)]
            #[formmap(skip)]
            notes: Vec<String>
        };
        let options = extract_field_options(&field.attrs).unwrap();
        assert!(options.skip);
        assert_eq!(options.rename, None);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let field: syn::Field = parse_quote! {
            #[formmap(flatten)]
            inner: Inner
        };
        let err = extract_field_options(&field.attrs).unwrap_err();
        assert!(err.to_string().contains("unsupported formmap attribute"));
    }

    #[test]
    fn test_skipped_and_excluded_fields_are_not_mapped() {
        let input: DeriveInput = parse_quote! {
            struct Document {
                id: String,
                #[formmap(skip)]
                secret: Token,
                #[formmap(rename = "-")]
                cache: Cache,
                #[formmap(rename = "title")]
                name: String,
                r#type: String,
            }
        };
        let names: Vec<String> = mapped_fields(&input, "DomainRecord")
            .unwrap()
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, vec!["id", "title", "type"]);
    }

    #[test]
    fn test_enum_is_rejected() {
        let input: DeriveInput = parse_quote! {
            enum Status { Active, Archived }
        };
        let err = impl_domain_record(&input).unwrap_err();
        assert_eq!(err.to_string(), "DomainRecord only supports structs");
    }

    #[test]
    fn test_tuple_struct_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper(String);
        };
        let err = impl_form_record(&input).unwrap_err();
        assert_eq!(err.to_string(), "FormRecord only supports structs with named fields");
    }

    #[test]
    fn test_form_record_matches_on_field_names() {
        let input: DeriveInput = parse_quote! {
            struct ItemForm {
                item_id: InputField,
                #[formmap(rename = "label")]
                item_name: InputField,
            }
        };
        let generated = impl_form_record(&input).unwrap().to_string();
        assert!(generated.contains("\"item_id\" =>"));
        assert!(generated.contains("\"label\" =>"));
        assert!(!generated.contains("\"item_name\""));
    }

    #[test]
    fn test_generic_params_get_bounds() {
        let input: DeriveInput = parse_quote! {
            struct Page<T> {
                items: Vec<T>,
            }
        };
        let generated = impl_domain_record(&input).unwrap().to_string();
        assert!(generated.contains("T : :: rusty_formmap :: DomainValue"));
    }

    #[test]
    fn test_generic_form_fields_get_bounds() {
        let input: DeriveInput = parse_quote! {
            struct PageForm<T> {
                items: Vec<T>,
                selected: Option<T>,
                #[formmap(skip)]
                cursor: Cursor<T>,
            }
        };
        let generated = impl_form_record(&input).unwrap().to_string();
        assert!(generated.contains("Vec < T > : :: rusty_formmap :: FormValue"));
        assert!(generated.contains("Option < T > : :: rusty_formmap :: FormValue"));
        assert!(!generated.contains("Cursor < T > :"));
    }

    #[test]
    fn test_concrete_form_has_no_where_clause() {
        let input: DeriveInput = parse_quote! {
            struct ItemForm {
                items: Vec<InputField>,
            }
        };
        let generated = impl_form_record(&input).unwrap().to_string();
        assert!(!generated.contains("where"));
    }
}
