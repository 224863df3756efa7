use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

type Registry = RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>;

static CANONICAL: OnceLock<Registry> = OnceLock::new();

/// Returns the process-wide instance of `V`, building it with `make` on the
/// first request for that type. Concurrent first requests observe a single
/// instance; entries live for the rest of the process.
pub(crate) fn canonical<V, F>(make: F) -> &'static V
where
    V: Any + Send + Sync,
    F: FnOnce() -> V,
{
    let registry = CANONICAL.get_or_init(Default::default);
    let id = TypeId::of::<V>();

    let existing = registry
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied();
    if let Some(found) = existing.and_then(|entry| entry.downcast_ref::<V>()) {
        return found;
    }

    // Another thread may have won the race between the read and write locks;
    // `or_insert_with` keeps whichever instance landed first.
    let entry = *registry
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert_with(|| -> &'static (dyn Any + Send + Sync) { Box::leak(Box::new(make())) });

    match entry.downcast_ref::<V>() {
        Some(found) => found,
        None => unreachable!("canonical registry entry keyed by a foreign TypeId"),
    }
}
