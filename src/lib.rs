#[macro_use]
mod macros;

mod tree;
mod path;
mod zipper;
mod traverse;
mod ancestor;
mod legacy;
mod ast;
mod parse_ast;
mod util;

#[cfg(test)]
mod proptests;

pub use {
    string_cache::DefaultAtom as Symbol,
    tree::*,
    path::*,
    zipper::*,
    traverse::*,
    ancestor::*,
    ast::*,
    parse_ast::*,
    util::*,
};
