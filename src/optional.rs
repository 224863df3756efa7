//! # Optional Module
//!
//! A container holding either exactly one value or nothing at all.
//!
//! The two states are fixed at construction. No operation mutates a
//! container: transformations hand back either the same container or a new
//! one, so a container can be read from any number of threads at once.
//!
//! ## Absence
//!
//! An `Optional` never holds the absence marker of its value's
//! representation. Values that might be absent enter through
//! [`Nullable`], which strips the marker:
//!
//! ```text
//! Optional::of_nullable(None::<i32>)      => Optional.empty
//! Optional::of(None::<i32>)               => Err(NullReference)
//! Optional::of(42)                        => Ok(Optional[42])
//! Optional::of(1)?.map(|_| None::<i32>)   => Optional.empty
//! ```
//!
//! `of_value` and `map_value` skip the marker check. They exist for value
//! types with no `Nullable` impl; the caller vouches that nothing absent is
//! being wrapped.
//!
//! ## Sharing
//!
//! The held value sits behind an `Arc`. Cloning a container, or getting it
//! back from [`filter`](Optional::filter) or [`or`](Optional::or), shares the
//! very same value; [`Optional::ptr_eq`] observes that identity.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::OptionalError;
use crate::nullable::Nullable;
use crate::shared;

/// Zero or one shared instance of `T`.
pub struct Optional<T> {
    value: Option<Arc<T>>,
}

impl<T> Optional<T> {
    /// The empty container. Every empty container is interchangeable with
    /// [`Optional::shared_empty`]: they compare equal and `ptr_eq`.
    pub const fn empty() -> Self {
        Optional { value: None }
    }

    /// Wraps `value` as is, without looking for an absence marker.
    /// Prefer [`of`](Self::of) for representations that can be absent.
    pub fn of_value(value: T) -> Self {
        Optional {
            value: Some(Arc::new(value)),
        }
    }

    /// Wraps a value that is already shared, without copying it.
    pub fn from_arc(value: Arc<T>) -> Self {
        Optional { value: Some(value) }
    }

    /// Wraps a value that must be present.
    ///
    /// Fails with [`OptionalError::NullReference`] when `value` is the
    /// absence marker of its representation.
    pub fn of<N>(value: N) -> Result<Self, OptionalError>
    where
        N: Nullable<Value = T>,
    {
        value
            .into_present()
            .map(Self::of_value)
            .ok_or(OptionalError::NullReference("Optional::of"))
    }

    /// Wraps a value that may be absent. Never fails.
    pub fn of_nullable<N>(value: N) -> Self
    where
        N: Nullable<Value = T>,
    {
        value.into_present().map_or_else(Self::empty, Self::of_value)
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the held value, or [`OptionalError::NoSuchElement`] when empty.
    pub fn get(&self) -> Result<&T, OptionalError> {
        self.value.as_deref().ok_or(OptionalError::NoSuchElement)
    }

    /// Like [`get`](Self::get) but hands out another owner of the held value.
    pub fn get_arc(&self) -> Result<Arc<T>, OptionalError> {
        self.value.clone().ok_or(OptionalError::NoSuchElement)
    }

    pub fn as_option(&self) -> Option<&T> {
        self.value.as_deref()
    }

    pub fn into_arc(self) -> Option<Arc<T>> {
        self.value
    }

    /// Runs `consumer` once with the held value. Does nothing when empty.
    pub fn if_present<F>(&self, consumer: F)
    where
        F: FnOnce(&T),
    {
        if let Some(value) = self.value.as_deref() {
            consumer(value);
        }
    }

    /// Runs exactly one of the two callbacks, depending on the state.
    pub fn if_present_or_else<F, G>(&self, consumer: F, otherwise: G)
    where
        F: FnOnce(&T),
        G: FnOnce(),
    {
        match self.value.as_deref() {
            Some(value) => consumer(value),
            None => otherwise(),
        }
    }

    /// Keeps this container if it is empty or `predicate` accepts its value;
    /// otherwise returns the empty container. The predicate is not called
    /// on an empty container.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        let keep = match self.value.as_deref() {
            Some(value) => predicate(value),
            None => true,
        };
        if keep {
            self
        } else {
            Self::empty()
        }
    }

    /// Applies `mapper` and wraps its result through
    /// [`of_nullable`](Optional::of_nullable): an absent result yields the
    /// empty container.
    pub fn map<N, F>(self, mapper: F) -> Optional<N::Value>
    where
        N: Nullable,
        F: FnOnce(&T) -> N,
    {
        match self.value {
            Some(value) => Optional::of_nullable(mapper(&value)),
            None => Optional::empty(),
        }
    }

    /// Applies `mapper` and wraps its result without a marker check.
    pub fn map_value<U, F>(self, mapper: F) -> Optional<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self.value {
            Some(value) => Optional::of_value(mapper(&value)),
            None => Optional::empty(),
        }
    }

    /// Returns the container produced by `mapper` as is, without wrapping it
    /// again. A mapper that produces no container at all fails with
    /// [`OptionalError::NullReference`].
    pub fn flat_map<U, N, F>(self, mapper: F) -> Result<Optional<U>, OptionalError>
    where
        N: Nullable<Value = Optional<U>>,
        F: FnOnce(&T) -> N,
    {
        match self.value {
            Some(value) => mapper(&value)
                .into_present()
                .ok_or(OptionalError::NullReference("Optional::flat_map")),
            None => Ok(Optional::empty()),
        }
    }

    /// Returns this container if present, otherwise the one `supplier` builds.
    pub fn or<F>(self, supplier: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        if self.is_present() {
            self
        } else {
            supplier()
        }
    }

    /// Returns the held value, or `other` when empty.
    pub fn or_else(&self, other: T) -> T
    where
        T: Clone,
    {
        self.value.as_deref().cloned().unwrap_or(other)
    }

    /// Returns the held value, or the result of `supplier` when empty.
    /// `supplier` only runs on the empty path.
    pub fn or_else_get<F>(&self, supplier: F) -> T
    where
        T: Clone,
        F: FnOnce() -> T,
    {
        self.value.as_deref().cloned().unwrap_or_else(supplier)
    }

    /// Returns the held value, or the error built by `error_supplier`.
    /// The error is passed through exactly as the supplier produced it.
    pub fn or_else_throw<E, F>(&self, error_supplier: F) -> Result<&T, E>
    where
        F: FnOnce() -> E,
    {
        self.value.as_deref().ok_or_else(error_supplier)
    }

    /// [`if_present`](Self::if_present) for a consumer that can fail.
    pub fn try_if_present<E, F>(&self, consumer: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<(), E>,
    {
        match self.value.as_deref() {
            Some(value) => consumer(value),
            None => Ok(()),
        }
    }

    /// [`filter`](Self::filter) for a predicate that can fail. The failure
    /// is returned unchanged.
    pub fn try_filter<E, P>(self, predicate: P) -> Result<Self, E>
    where
        P: FnOnce(&T) -> Result<bool, E>,
    {
        let keep = match self.value.as_deref() {
            Some(value) => predicate(value)?,
            None => true,
        };
        Ok(if keep { self } else { Self::empty() })
    }

    /// [`map`](Self::map) for a mapper that can fail.
    pub fn try_map<N, E, F>(self, mapper: F) -> Result<Optional<N::Value>, E>
    where
        N: Nullable,
        F: FnOnce(&T) -> Result<N, E>,
    {
        match self.value {
            Some(value) => Ok(Optional::of_nullable(mapper(&value)?)),
            None => Ok(Optional::empty()),
        }
    }

    /// [`or_else_get`](Self::or_else_get) for a supplier that can fail.
    pub fn or_else_try_get<E, F>(&self, supplier: F) -> Result<T, E>
    where
        T: Clone,
        F: FnOnce() -> Result<T, E>,
    {
        match self.value.as_deref() {
            Some(value) => Ok(value.clone()),
            None => supplier(),
        }
    }

    /// Identity comparison: both empty, or both sharing one held value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Equality against a value of any type. Only another `Optional<T>` can
    /// compare equal; a bare `T` never equals the container holding it.
    pub fn eq_any(&self, other: &dyn Any) -> bool
    where
        T: PartialEq + 'static,
    {
        other
            .downcast_ref::<Optional<T>>()
            .map_or(false, |other| self == other)
    }
}

impl<T> Optional<T>
where
    T: Send + Sync + 'static,
{
    /// The process-wide empty container for `T`. Every call, from any
    /// thread, returns the same reference.
    pub fn shared_empty() -> &'static Optional<T> {
        shared::canonical(Optional::<T>::empty)
    }
}

impl<T> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Optional {
            value: self.value.clone(),
        }
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T: Hash> Hash for Optional<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => write!(f, "Optional[{}]", value),
            None => f.write_str("Optional.empty"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => write!(f, "Optional[{:?}]", value),
            None => f.write_str("Optional.empty"),
        }
    }
}

impl<T> Nullable for Optional<T> {
    type Value = Optional<T>;

    #[inline]
    fn into_present(self) -> Option<Optional<T>> {
        Some(self)
    }

    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Optional::of_nullable(value)
    }
}

impl<T> From<Optional<T>> for Option<Arc<T>> {
    fn from(optional: Optional<T>) -> Self {
        optional.into_arc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_empty_is_not_present() {
        let empty = Optional::<i32>::empty();
        assert!(!empty.is_present());
        assert!(empty.is_empty());
        assert_eq!(empty.get(), Err(OptionalError::NoSuchElement));
    }

    #[test]
    fn test_of_rejects_absent() {
        let err = Optional::<String>::of(None).unwrap_err();
        assert_eq!(err, OptionalError::NullReference("Optional::of"));

        let err = Optional::<i32>::of(None).unwrap_err();
        assert!(err.is_null_reference());
    }

    #[test]
    fn test_of_matches_of_nullable() {
        let a = Optional::of("x").unwrap();
        let b = Optional::of_nullable(Some("x"));
        assert_eq!(a, b);
        assert_eq!(a.get(), Ok(&"x"));
    }

    #[test]
    fn test_filter_keeps_same_instance() {
        let opt = Optional::of(String::from("kept")).unwrap();
        let before = opt.clone();
        let after = opt.filter(|s| s.starts_with('k'));
        assert!(after.ptr_eq(&before));
    }

    #[test]
    fn test_filter_skips_predicate_when_empty() {
        let calls = Cell::new(0);
        let out = Optional::<i32>::empty().filter(|_| {
            calls.set(calls.get() + 1);
            true
        });
        assert!(out.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_map_absent_result_is_empty() {
        let out = Optional::of(1).unwrap().map(|_| None::<i32>);
        assert!(out.is_empty());
        assert!(out.ptr_eq(&Optional::empty()));

        let out = Optional::of("abc").unwrap().map(|s| s.parse::<i32>().ok());
        assert!(out.is_empty());
    }

    #[test]
    fn test_map_value_skips_marker_check() {
        #[derive(Debug, PartialEq)]
        struct Celsius(i32);

        let out = Optional::of(21).unwrap().map_value(|c| Celsius(*c));
        assert_eq!(out.get(), Ok(&Celsius(21)));
    }

    #[test]
    fn test_flat_map_absent_container() {
        let err = Optional::of(1)
            .unwrap()
            .flat_map(|_| None::<Optional<i32>>)
            .unwrap_err();
        assert_eq!(err, OptionalError::NullReference("Optional::flat_map"));
    }

    #[test]
    fn test_flat_map_cannot_smuggle_marker() {
        let out = Optional::of(1)
            .unwrap()
            .flat_map(|_| Optional::<i32>::of(None).unwrap_or_default())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_try_filter_passes_failure_through() {
        let err = Optional::of_value(3).try_filter(|_| Err("bad predicate"));
        assert_eq!(err.unwrap_err(), "bad predicate");

        let opt = Optional::of_value(3);
        let kept = opt.clone().try_filter(|v| Ok::<_, ()>(*v == 3)).unwrap();
        assert!(kept.ptr_eq(&opt));

        let calls = Cell::new(0);
        let out = Optional::<i32>::empty()
            .try_filter(|_| {
                calls.set(1);
                Err("unreachable")
            })
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_try_map() {
        let err = Optional::of_value(1).try_map(|_| Err::<i32, _>("bad mapper"));
        assert_eq!(err.unwrap_err(), "bad mapper");

        let out = Optional::of_value(1).try_map(|_| Ok::<_, ()>(None::<i32>)).unwrap();
        assert!(out.is_empty());

        let out = Optional::of_value(1).try_map(|v| Ok::<_, ()>(v + 1)).unwrap();
        assert_eq!(out.get(), Ok(&2));
    }

    #[test]
    fn test_try_if_present_and_or_else_try_get() {
        assert_eq!(Optional::of_value(1).try_if_present(|_| Err("bad consumer")), Err("bad consumer"));
        assert_eq!(Optional::<i32>::empty().try_if_present(|_| Err("bad consumer")), Ok(()));

        assert_eq!(Optional::of_value(1).or_else_try_get(|| Err("bad supplier")), Ok(1));
        assert_eq!(Optional::<i32>::empty().or_else_try_get(|| Err("bad supplier")), Err("bad supplier"));
        assert_eq!(Optional::<i32>::empty().or_else_try_get(|| Ok::<_, ()>(9)), Ok(9));
    }

    #[test]
    fn test_or_prefers_present() {
        let calls = Cell::new(0);
        let out = Optional::of_value(1).or(|| {
            calls.set(1);
            Optional::of_value(2)
        });
        assert_eq!(out.get(), Ok(&1));
        assert_eq!(calls.get(), 0);
        assert_eq!(Optional::empty().or(|| Optional::of_value(2)).get(), Ok(&2));
    }

    #[test]
    fn test_rendering() {
        assert_eq!(Optional::<&str>::empty().to_string(), "Optional.empty");
        assert_eq!(Optional::of_value("foo").to_string(), "Optional[foo]");
        assert_eq!(format!("{:?}", Optional::of_value("foo")), "Optional[\"foo\"]");
    }

    #[test]
    fn test_shared_empty_is_stable() {
        let a = Optional::<u64>::shared_empty();
        let b = Optional::<u64>::shared_empty();
        assert!(std::ptr::eq(a, b));
        assert!(a.ptr_eq(&Optional::empty()));
    }

    #[test]
    fn test_shared_empty_per_type() {
        let ints = Optional::<i8>::shared_empty() as *const Optional<i8> as usize;
        let strings = Optional::<String>::shared_empty() as *const Optional<String> as usize;
        assert_ne!(ints, strings);
    }
}
