// File: src/validation/garde.rs
// Purpose: Turn garde validation reports into path-keyed form errors

use crate::path::FieldPath;

use super::{ValidationError, ValidationErrors, ValidationField};

/// Key used for failures that are not attached to a field
pub const ROOT_ERROR_KEY: &str = "_error";

/// Validate `input` with garde, returning the failures if there are any
///
/// # Example
///
/// ```ignore
/// #[derive(garde::Validate, DomainRecord)]
/// struct Product {
///     #[garde(length(min = 3))]
///     name: String,
/// }
///
/// let errors = rusty_formmap::validation::garde::validate(&product);
/// mapper.map(&product, &errors, &mut form)?;
/// ```
pub fn validate<T>(input: &T) -> Option<ValidationError>
where
    T: ::garde::Validate + ?Sized,
    T::Context: Default,
{
    input.validate().err().map(|report| parse_report(&report))
}

/// Like [`validate`], with an explicit garde context
pub fn validate_with<T>(input: &T, ctx: &T::Context) -> Option<ValidationError>
where
    T: ::garde::Validate + ?Sized,
{
    input.validate_with(ctx).err().map(|report| parse_report(&report))
}

/// Convert a garde report into form errors.
///
/// garde paths already use the `items[0].price` form, so they are used as-is.
/// Failures on the value itself (empty path) are stored under `"_error"`.
/// When a field fails several rules, the first reported one is kept.
pub fn parse_report(report: &::garde::Report) -> ValidationError {
    let mut errors = ValidationErrors::new();

    for (path, error) in report.iter() {
        let path = FieldPath::from(path.to_string());
        let key = if path.is_root() {
            ROOT_ERROR_KEY.to_string()
        } else {
            path.to_string()
        };

        if errors.get(&key).is_some() {
            continue;
        }

        let field = path.leaf_name().unwrap_or_else(|| ROOT_ERROR_KEY.to_string());
        errors.insert(key, ValidationField::with_message(field, error.message()));
    }

    ValidationError::new(errors)
}

impl From<::garde::Report> for ValidationError {
    fn from(report: ::garde::Report) -> Self {
        parse_report(&report)
    }
}
