
/// replay a route of `Move`s from a zipper, yielding None if any step isn't possible.
/// `zip_moves!(z; Down, Right, Down)` is `z.follow(&[Move::Down, Move::Right, Move::Down])`
#[macro_export]
macro_rules! zip_moves {
    (   $zipper:expr;
        $($mv:ident),* $(,)?
    ) => {
        ($zipper).follow(&[$($crate::Move::$mv),*])
    }
}

/// parse a tree from a string literal in tests and docs, panicking with
/// the parse error if the literal is malformed
#[macro_export]
macro_rules! tree {
    (   $src:expr
    ) => {{
        match $crate::parse_value($src) {
            Ok(value) => value,
            Err(e) => panic!("tree!({:?}): {}", $src, e),
        }
    }}
}
