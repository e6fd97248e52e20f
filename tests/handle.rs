use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use glfw_handle::{EglContext, EglSurface, Handle, HandleKind, Monitor, Window};

const RAW_VALUES: [usize; 7] =
    [0, 1, 0x10, 0x7fff_0000, usize::MAX / 2, usize::MAX - 1, usize::MAX];

fn hash_of<K: HandleKind>(handle: &Handle<K>) -> u64 {
    let mut hasher = DefaultHasher::new();
    handle.hash(&mut hasher);
    hasher.finish()
}

fn handles() -> Vec<EglContext> {
    // Duplicates on purpose, so equal pairs built independently show up.
    RAW_VALUES.iter().chain(RAW_VALUES.iter()).map(|&raw| EglContext::from_raw(raw)).collect()
}

#[test]
fn equality_is_an_equivalence() {
    let handles = handles();
    for a in &handles {
        assert_eq!(a, a);
        for b in &handles {
            assert_eq!(a == b, b == a);
            assert_eq!(a == b, a.as_raw() == b.as_raw());
            for c in &handles {
                if a == b && b == c {
                    assert_eq!(a, c);
                }
            }
        }
    }
}

#[test]
fn equal_handles_hash_equally() {
    let handles = handles();
    for a in &handles {
        for b in handles.iter().filter(|b| *b == a) {
            assert_eq!(hash_of(a), hash_of(b));
        }
    }
}

#[test]
fn raw_round_trip() {
    for raw in RAW_VALUES {
        assert_eq!(Window::from_raw(raw).as_raw(), raw);
        assert_eq!(Window::from_ptr(Window::from_raw(raw).as_ptr()).as_raw(), raw);
    }
}

#[test]
fn none_sentinel() {
    assert_eq!(Monitor::none().as_raw(), 0);
    assert_eq!(Monitor::none(), Monitor::default());
    assert_eq!(Monitor::none(), Monitor::NONE);
    assert!(Monitor::from_raw(0).is_none());
    for raw in RAW_VALUES.into_iter().filter(|&raw| raw != 0) {
        assert_ne!(Monitor::from_raw(raw), Monitor::NONE);
    }
}

#[test]
fn independent_handles_are_interchangeable_keys() {
    let mut surfaces: HashMap<Window, EglSurface> = HashMap::new();
    surfaces.insert(Window::from_raw(0xa0), EglSurface::from_raw(0xb0));

    let looked_up = Window::from_ptr(0xa0 as *const std::ffi::c_void);
    assert_eq!(surfaces.get(&looked_up), Some(&EglSurface::from_raw(0xb0)));

    let set: HashSet<EglContext> = handles().into_iter().collect();
    assert_eq!(set.len(), RAW_VALUES.len());
}

#[test]
fn debug_contains_raw_value() {
    let handle = EglContext::from_raw(0x5f00_1234);
    let debug = format!("{handle:?}");
    assert!(debug.contains("5f001234"), "{debug}");
    assert!(debug.starts_with("EGLContext"), "{debug}");
}

#[test]
fn handles_are_shared_across_threads() {
    let window = Window::from_raw(0x1234);
    let seen = std::thread::spawn(move || window).join().unwrap();
    assert_eq!(seen, window);
}
