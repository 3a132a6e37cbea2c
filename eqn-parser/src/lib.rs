//! Parser for the loose equation shorthand typed into the UI, along with printers for the three
//! notations the application deals with:
//!
//! - the simple shorthand itself ([`std::fmt::Display`]),
//! - presentation markup for typesetting ([`parser::fmt::Latex`]),
//! - the canonical syntax accepted by the solver ([`parser::fmt::Canonical`]).

pub mod parser;
pub mod tokenizer;
