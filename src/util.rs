use crate::*;

/// convenience function for asserting that two handles are the same value,
/// not merely equal ones
pub fn assert_same<T: Tree>(a: &T, b: &T) {
    assert!(a.same(b), "expected the same value, got ids {:#x} and {:#x}", a.id(), b.id());
}

pub fn assert_not_same<T: Tree>(a: &T, b: &T) {
    assert!(!a.same(b), "expected different values, both have id {:#x}", a.id());
}

/// convenience function for asserting that following `moves` from the root of
/// `src` lands on a value that prints as `expected`
pub fn assert_moves(src: &str, moves: &[Move], expected: &str) {
    let z = Zipper::new(tree!(src));
    let found = z.follow(moves).unwrap_or_else(|| panic!("moves {:?} fell off {}", moves, src));
    assert_eq!(found.focus().to_string(), expected);
}

/// Install a tracing subscriber for tests. Only does anything when `RUST_LOG`
/// is set, eg `RUST_LOG=astzip=trace cargo test`. Safe to call more than once.
#[cfg(test)]
pub(crate) fn init_tracing() {
    use std::sync::Once;
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_test_writer())
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
