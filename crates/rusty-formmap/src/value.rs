// File: src/value.rs
// Purpose: Read-only view of domain values walked by the mapper

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};

/// A value the mapper can read from.
///
/// Implemented for scalars, sequences, `Option`, smart pointers and the temporal
/// types used in forms. Structs get it from `#[derive(DomainRecord)]`.
pub trait DomainValue: Any {
    /// Structural shape of this value
    fn node(&self) -> DomainNode<'_>;

    /// Whether this is the zero value for its type (rendered as a blank input)
    fn is_zero(&self) -> bool;

    /// Concrete value, used for converter lookup by exact type
    fn as_any(&self) -> &dyn Any;
}

impl dyn DomainValue {
    /// Borrow the concrete value if it is a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Shape of a domain value
pub enum DomainNode<'a> {
    /// Named fields
    Record(&'a dyn DomainRecord),
    /// Ordered sequence
    Seq(&'a dyn DomainSeq),
    /// Optional reference; `None` when absent
    Ref(Option<&'a dyn DomainValue>),
    /// Leaf value
    Scalar(Scalar<'a>),
}

/// Built-in rendering kinds for leaf values
#[derive(Clone, Copy)]
pub enum Scalar<'a> {
    Text(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Float32(f32),
    Bool(bool),
    /// Anything else, rendered with `Display`
    Display(&'a dyn fmt::Display),
}

impl Scalar<'_> {
    pub fn is_bool(&self) -> bool {
        matches!(self, Scalar::Bool(_))
    }

    /// Default display string for this kind
    pub fn render(&self) -> String {
        match self {
            Scalar::Text(s) => (*s).to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Uint(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Float32(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Display(value) => value.to_string(),
        }
    }
}

/// A struct-like domain value with named fields
pub trait DomainRecord {
    /// `(name, value)` pairs in declaration order. A name of `"-"` is skipped.
    fn fields(&self) -> Vec<(&'static str, &dyn DomainValue)>;
}

/// An ordered sequence of domain values
pub trait DomainSeq {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn DomainValue>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! scalar_value {
    ($($ty:ty => |$v:ident| $kind:expr),* $(,)?) => {
        $(
            impl DomainValue for $ty {
                fn node(&self) -> DomainNode<'_> {
                    let $v = self;
                    DomainNode::Scalar($kind)
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

scalar_value! {
    String => |v| Scalar::Text(v.as_str()),
    &'static str => |v| Scalar::Text(*v),
    char => |v| Scalar::Display(v),
    bool => |v| Scalar::Bool(*v),
    i8 => |v| Scalar::Int(i64::from(*v)),
    i16 => |v| Scalar::Int(i64::from(*v)),
    i32 => |v| Scalar::Int(i64::from(*v)),
    i64 => |v| Scalar::Int(*v),
    isize => |v| Scalar::Int(*v as i64),
    i128 => |v| Scalar::Display(v),
    u8 => |v| Scalar::Uint(u64::from(*v)),
    u16 => |v| Scalar::Uint(u64::from(*v)),
    u32 => |v| Scalar::Uint(u64::from(*v)),
    u64 => |v| Scalar::Uint(*v),
    usize => |v| Scalar::Uint(*v as u64),
    u128 => |v| Scalar::Display(v),
}

// Zero is the all-zero bit pattern, so `-0.0` is a value and renders as "-0"
macro_rules! float_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl DomainValue for $ty {
                fn node(&self) -> DomainNode<'_> {
                    DomainNode::Scalar(Scalar::$kind(*self))
                }

                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

float_value! {
    f32 => Float32,
    f64 => Float,
}

// Temporal types fall back to Display; the mapper registers converters for them.
scalar_value! {
    DateTime<Utc> => |v| Scalar::Display(v),
    DateTime<FixedOffset> => |v| Scalar::Display(v),
    NaiveDate => |v| Scalar::Display(v),
}

impl DomainValue for TimeDelta {
    fn node(&self) -> DomainNode<'_> {
        DomainNode::Scalar(Scalar::Int(self.num_seconds()))
    }

    fn is_zero(&self) -> bool {
        TimeDelta::is_zero(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl DomainValue for Duration {
    fn node(&self) -> DomainNode<'_> {
        DomainNode::Scalar(Scalar::Uint(self.as_secs()))
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: DomainValue> DomainValue for Option<T> {
    fn node(&self) -> DomainNode<'_> {
        DomainNode::Ref(self.as_ref().map(|v| v as &dyn DomainValue))
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: DomainValue> DomainSeq for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&dyn DomainValue> {
        self.as_slice().get(index).map(|v| v as &dyn DomainValue)
    }
}

impl<T: DomainValue> DomainValue for Vec<T> {
    fn node(&self) -> DomainNode<'_> {
        DomainNode::Seq(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: DomainValue, const N: usize> DomainSeq for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn DomainValue> {
        self.as_slice().get(index).map(|v| v as &dyn DomainValue)
    }
}

impl<T: DomainValue, const N: usize> DomainValue for [T; N] {
    fn node(&self) -> DomainNode<'_> {
        DomainNode::Seq(self)
    }

    fn is_zero(&self) -> bool {
        self.iter().all(|v| v.is_zero())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Smart pointers are transparent: same node, same zero check, same type identity
// for converter lookup. `Box<dyn DomainValue>` is the dynamic value case.
macro_rules! transparent_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: DomainValue + ?Sized> DomainValue for $ptr<T> {
                fn node(&self) -> DomainNode<'_> {
                    (**self).node()
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }

                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }
            }
        )*
    };
}

transparent_pointer!(Box, Rc, Arc);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_zero_values() {
        assert!(String::new().is_zero());
        assert!(0i32.is_zero());
        assert!(0.0f64.is_zero());
        assert!(false.is_zero());
        assert!(Duration::ZERO.is_zero());
        assert!(DateTime::<Utc>::default().is_zero());
        assert!(None::<String>.is_zero());
        assert!(Vec::<i32>::new().is_zero());

        assert!(!"x".to_string().is_zero());
        assert!(!(-1i64).is_zero());
        assert!(!true.is_zero());
        assert!(!Some(0).is_zero());
        assert!(!vec![0].is_zero());
    }

    #[test]
    fn test_negative_zero_is_not_zero() {
        assert!(0.0f32.is_zero());
        assert!(!(-0.0f64).is_zero());
        assert!(!(-0.0f32).is_zero());
        assert!(!f64::NAN.is_zero());
    }

    #[test]
    fn test_scalar_render() {
        assert_eq!(Scalar::Int(-42).render(), "-42");
        assert_eq!(Scalar::Uint(18_446_744_073_709_551_615).render(), "18446744073709551615");
        assert_eq!(Scalar::Float(10.5).render(), "10.5");
        assert_eq!(Scalar::Float(20.0).render(), "20");
        assert_eq!(Scalar::Float(1e21).render(), "1000000000000000000000");
        assert_eq!(Scalar::Float32(0.1).render(), "0.1");
        assert_eq!(Scalar::Bool(false).render(), "false");
        assert_eq!(Scalar::Display(&'x').render(), "x");
    }

    #[test]
    fn test_boxed_value_is_transparent() {
        let boxed: Box<dyn DomainValue> = Box::new(42u16);
        assert!(boxed.downcast_ref::<u16>().is_some());
        assert!(matches!(boxed.node(), DomainNode::Scalar(Scalar::Uint(42))));
        assert!(!boxed.is_zero());
    }

    #[test]
    fn test_sequence_access() {
        let tags = vec!["a".to_string(), "b".to_string()];
        let DomainNode::Seq(seq) = tags.node() else {
            panic!("expected a sequence");
        };
        assert_eq!(seq.len(), 2);
        assert!(seq.get(2).is_none());
        let second = seq.get(1).and_then(|v| v.downcast_ref::<String>());
        assert_eq!(second.map(String::as_str), Some("b"));
    }
}
