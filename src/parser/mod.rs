//! Parser for flow scripts

pub mod ast;
pub mod cst;
mod grammar;
pub mod lexer;
pub mod transform;

pub use ast::*;
pub use grammar::{parse, parse_raw};
