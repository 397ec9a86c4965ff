// File: src/form.rs
// Purpose: Form-side values the mapper writes into

use serde::{Deserialize, Serialize};

/// Display value and error message for one form input
///
/// Every scalar domain field ends up in exactly one `InputField`. Templates read
/// `value` to fill the input and `error` to show the message next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputField {
    pub value: String,
    pub error: String,
}

impl InputField {
    pub fn new(value: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: error.into(),
        }
    }

    /// Overwrite value and error together
    pub fn set(&mut self, value: impl Into<String>, error: impl Into<String>) {
        self.value = value.into();
        self.error = error.into();
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// A value the mapper can write into.
///
/// Implemented for `InputField`, `Vec<T>`, `Option<T>` and `Box<T>`. Structs get
/// it from `#[derive(FormRecord)]`.
pub trait FormValue {
    /// Structural shape of this value
    fn node_mut(&mut self) -> FormNode<'_>;

    /// The input field, if this value is one
    fn as_input_mut(&mut self) -> Option<&mut InputField> {
        match self.node_mut() {
            FormNode::Input(input) => Some(input),
            _ => None,
        }
    }
}

/// Shape of a form value
pub enum FormNode<'a> {
    /// Leaf `(value, error)` pair
    Input(&'a mut InputField),
    /// Named fields
    Record(&'a mut dyn FormRecord),
    /// Ordered sequence
    Seq(&'a mut dyn FormSeq),
    /// Optional reference
    Ref(&'a mut dyn FormRef),
}

/// A struct-like form value with named fields
pub trait FormRecord {
    /// Mutable access to the field called `name`
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FormValue>;

    /// Names of all mappable fields
    fn field_names(&self) -> &'static [&'static str];
}

/// An ordered, resizable sequence of form values
pub trait FormSeq {
    fn len(&self) -> usize;

    /// Replace the contents with `len` default-initialized slots
    fn reset(&mut self, len: usize);

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn FormValue>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An optional form value (e.g. a nested form that only exists when the domain has data)
pub trait FormRef {
    fn is_absent(&self) -> bool;

    /// Reset to the absent state
    fn clear(&mut self);

    fn get_mut(&mut self) -> Option<&mut dyn FormValue>;

    /// Allocate a zero-valued target when absent, then borrow it
    fn get_or_insert_default(&mut self) -> &mut dyn FormValue;
}

impl FormValue for InputField {
    fn node_mut(&mut self) -> FormNode<'_> {
        FormNode::Input(self)
    }
}

impl<T: FormValue + Default> FormSeq for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn reset(&mut self, len: usize) {
        *self = std::iter::repeat_with(T::default).take(len).collect();
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn FormValue> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|v| v as &mut dyn FormValue)
    }
}

impl<T: FormValue + Default> FormValue for Vec<T> {
    fn node_mut(&mut self) -> FormNode<'_> {
        FormNode::Seq(self)
    }
}

impl<T: FormValue + Default> FormRef for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn clear(&mut self) {
        *self = None;
    }

    fn get_mut(&mut self) -> Option<&mut dyn FormValue> {
        self.as_mut().map(|v| v as &mut dyn FormValue)
    }

    fn get_or_insert_default(&mut self) -> &mut dyn FormValue {
        self.get_or_insert_with(T::default)
    }
}

impl<T: FormValue + Default> FormValue for Option<T> {
    fn node_mut(&mut self) -> FormNode<'_> {
        FormNode::Ref(self)
    }
}

impl<T: FormValue + ?Sized> FormValue for Box<T> {
    fn node_mut(&mut self) -> FormNode<'_> {
        (**self).node_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_input_field_set() {
        let mut field = InputField::default();
        assert!(!field.has_error());

        field.set("Jo", "Minimum length is 3");
        assert_eq!(field, InputField::new("Jo", "Minimum length is 3"));
        assert!(field.has_error());
    }

    #[test]
    fn test_input_field_serializes_for_templates() {
        let field = InputField::new("10.5", "");
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"value":"10.5","error":""}"#);
    }

    #[test]
    fn test_seq_reset_replaces_contents() {
        let mut inputs = vec![InputField::new("stale", "stale")];
        FormSeq::reset(&mut inputs, 3);
        assert_eq!(inputs, vec![InputField::default(); 3]);
    }

    #[test]
    fn test_ref_allocates_and_clears() {
        let mut slot: Option<InputField> = None;
        assert!(slot.is_absent());
        assert!(FormRef::get_mut(&mut slot).is_none());

        slot.get_or_insert_default()
            .as_input_mut()
            .unwrap()
            .set("x", "");
        assert_eq!(slot, Some(InputField::new("x", "")));

        slot.clear();
        assert!(slot.is_none());
    }

    #[test]
    fn test_box_is_transparent() {
        let mut boxed = Box::new(InputField::default());
        assert!(boxed.as_input_mut().is_some());
    }
}
