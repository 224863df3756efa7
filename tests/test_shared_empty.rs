use optional_value::Optional;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Barrier};
use std::thread;

fn address<T>(opt: &'static Optional<T>) -> usize {
    opt as *const Optional<T> as usize
}

#[test]
fn test_repeated_calls_same_instance() {
    let first = address(Optional::<Vec<u8>>::shared_empty());
    for _ in 0..100 {
        assert_eq!(address(Optional::<Vec<u8>>::shared_empty()), first);
    }
}

#[test]
fn test_concurrent_callers_same_instance() {
    struct OnlyHere;

    let barrier = Arc::new(Barrier::new(16));
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                address(Optional::<OnlyHere>::shared_empty())
            })
        })
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected = address(Optional::<OnlyHere>::shared_empty());
    assert_eq!(addresses, vec![expected; 16]);
}

#[test]
fn test_shared_empty_matches_every_empty_path() {
    let shared = Optional::<String>::shared_empty();
    assert!(shared.ptr_eq(&Optional::empty()));
    assert!(shared.ptr_eq(&Optional::of_nullable(None)));
    assert!(shared.ptr_eq(&Optional::of_value(String::from("x")).filter(|_| false)));
    assert!(shared.ptr_eq(&Optional::<i32>::empty().map(|v| v.to_string())));
    assert_eq!(shared.to_string(), "Optional.empty");
}
