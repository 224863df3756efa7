//! # Nullable Module
//!
//! Host representations that can carry "no value".
//!
//! `Optional` never stores an absent value. Anything that may be absent has
//! to pass through [`Nullable::into_present`] first, which is where the
//! absence marker of the representation is recognised and stripped:
//!
//! | Representation | Absent when |
//! |---|---|
//! | `Option<V>` | `None` |
//! | `*const V` / `*mut V` | the pointer is null |
//! | `JsValue` (see [`web`](crate::web)) | `null` or `undefined` |
//! | `Optional<V>` | never (a container is always a container) |
//! | primitives, `String`, `&str`, `Vec`, `Box`, `Rc`, `Arc`, `()` | never |
//!
//! Types outside this table go through `Optional::of_value` /
//! `Optional::map_value`, or get their own impl.

use std::rc::Rc;
use std::sync::Arc;

/// A value that is either present or the absence marker of its representation.
pub trait Nullable: Sized {
    /// The present value once the marker has been ruled out.
    type Value;

    /// Returns `None` when `self` is the absence marker.
    fn into_present(self) -> Option<Self::Value>;

    fn is_absent(&self) -> bool;
}

impl<V> Nullable for Option<V> {
    type Value = V;

    #[inline]
    fn into_present(self) -> Option<V> {
        self
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

// Pointers are carried as opaque addresses and never dereferenced.
impl<V> Nullable for *const V {
    type Value = *const V;

    #[inline]
    fn into_present(self) -> Option<*const V> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<V> Nullable for *mut V {
    type Value = *mut V;

    #[inline]
    fn into_present(self) -> Option<*mut V> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

/// Implements `Nullable` for representations that have no absence marker.
macro_rules! never_absent {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nullable for $ty {
                type Value = $ty;

                #[inline]
                fn into_present(self) -> Option<$ty> {
                    Some(self)
                }

                #[inline]
                fn is_absent(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_absent! {
    (), bool, char, f32, f64, String,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
}

impl<'a> Nullable for &'a str {
    type Value = &'a str;

    #[inline]
    fn into_present(self) -> Option<&'a str> {
        Some(self)
    }

    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

macro_rules! never_absent_generic {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<V> Nullable for $wrapper<V> {
                type Value = $wrapper<V>;

                #[inline]
                fn into_present(self) -> Option<$wrapper<V>> {
                    Some(self)
                }

                #[inline]
                fn is_absent(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_absent_generic!(Vec, Box, Rc, Arc);

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_option_marker() {
        assert!(None::<i32>.is_absent());
        assert_eq!(None::<i32>.into_present(), None);
        assert_eq!(Some(7).into_present(), Some(7));
    }

    #[test]
    fn test_pointer_marker() {
        let x = 5u8;
        let p: *const u8 = &x;
        assert!(!p.is_absent());
        assert_eq!(p.into_present(), Some(p));

        let null: *const u8 = ptr::null();
        assert!(null.is_absent());
        assert_eq!(null.into_present(), None);

        let null_mut: *mut u8 = ptr::null_mut();
        assert_eq!(null_mut.into_present(), None);
    }

    #[test]
    fn test_plain_values_never_absent() {
        assert_eq!(0i32.into_present(), Some(0));
        assert_eq!("".into_present(), Some(""));
        assert_eq!(String::new().into_present(), Some(String::new()));
        assert_eq!(Vec::<u8>::new().into_present(), Some(Vec::new()));
        assert!(!f64::NAN.is_absent());
    }
}
