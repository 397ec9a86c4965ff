// rusty-formmap Procedural Macros
// Generates the static domain/form correspondence walked by the mapper

use proc_macro::TokenStream;

use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derive macro for the read side of a mapping
///
/// Generates `DomainRecord` and `DomainValue` implementations that expose every
/// named field, in declaration order, under its field name. The mapper walks
/// these fields and pairs each one with the same-named field of the form.
///
/// # Example
///
/// ```ignore
/// use rusty_formmap::DomainRecord;
///
/// #[derive(DomainRecord)]
/// struct Product {
///     name: String,
///     price: f64,
///     tags: Vec<String>,
///     metadata: Metadata,
///     discount: Option<f64>,
///
///     #[formmap(rename = "sku")]
///     stock_keeping_unit: String,
///
///     #[formmap(skip)]
///     internal_notes: NotMapped,
/// }
/// ```
///
/// # Field Attributes
///
/// - `#[formmap(rename = "name")]` - Use `name` as the path segment for this field
/// - `#[formmap(skip)]` - Never map this field (same as `rename = "-"`); the
///   field type does not need to implement `DomainValue`
///
/// A struct is considered zero (blank in the form) when every mapped field is zero.
#[proc_macro_derive(DomainRecord, attributes(formmap))]
pub fn derive_domain_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::impl_domain_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro for the write side of a mapping
///
/// Generates `FormRecord` and `FormValue` implementations so the mapper can look
/// up form fields by name and write into them. Fields are usually `InputField`,
/// nested form structs, `Vec<_>` of either, or `Option<_>` of a nested form.
///
/// # Example
///
/// ```ignore
/// use rusty_formmap::{FormRecord, InputField};
///
/// #[derive(FormRecord, Default)]
/// struct ProductForm {
///     name: InputField,
///     price: InputField,
///     tags: Vec<InputField>,
///     metadata: MetadataForm,
///     discount: InputField,
///     sku: InputField,
/// }
/// ```
///
/// `#[formmap(rename = "...")]` and `#[formmap(skip)]` behave as on `DomainRecord`.
/// Form structs used as slice elements or behind `Option` must also implement `Default`.
#[proc_macro_derive(FormRecord, attributes(formmap))]
pub fn derive_form_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::impl_form_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
