//! # rusty-formmap
//!
//! Maps a validated domain struct onto a parallel, template-friendly form
//! struct. Every leaf of the form is an [`InputField`] holding the display
//! string for the input and the validation message for that field.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rusty_formmap::{DomainRecord, FormRecord, InputField, Mapper};
//!
//! #[derive(DomainRecord, garde::Validate)]
//! struct Product {
//!     #[garde(length(min = 3))]
//!     name: String,
//!     #[garde(range(min = 0.01))]
//!     price: f64,
//!     #[garde(dive)]
//!     items: Vec<Item>,
//! }
//!
//! #[derive(FormRecord, Default)]
//! struct ProductForm {
//!     name: InputField,
//!     price: InputField,
//!     items: Vec<ItemForm>,
//! }
//!
//! let errors = rusty_formmap::validation::garde::validate(&product);
//! let mut form = ProductForm::default();
//! Mapper::new().map(&product, &errors, &mut form)?;
//! // form.items[0].price.error == "lower than 0.01"
//! ```
//!
//! ## Field paths
//!
//! Fields are matched by name. Nested fields use dots and sequence elements
//! use brackets: `metadata.version`, `items[2].price`. The same path is used
//! to look up validation messages, overrides and exclusions.
//!
//! ## Features
//!
//! - **`garde`** (default) - Build form errors from `garde::Report`

#![doc(html_root_url = "https://docs.rs/rusty-formmap/0.1.0")]

// Lets the derive output (`::rusty_formmap::...`) resolve inside this crate's own tests
extern crate self as rusty_formmap;

pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod mapper;
pub mod overrides;
pub mod path;
pub mod validation;
pub mod value;

// Derive macros live in the macro namespace, next to the traits of the same name
pub use rusty_formmap_derive::{DomainRecord, FormRecord};

pub use config::{DurationUnit, MapperConfig};
pub use convert::{Converter, ConverterRegistry};
pub use error::{MapError, Result};
pub use form::{FormNode, FormRecord, FormRef, FormSeq, FormValue, InputField};
pub use mapper::{MapOptions, Mapper};
pub use overrides::{value_override, FieldConverter, Override, OverrideRegistry};
pub use path::{FieldPath, Segment};
pub use validation::{ErrorLookup, ValidationError, ValidationErrors, ValidationField};
pub use value::{DomainNode, DomainRecord, DomainSeq, DomainValue, Scalar};
