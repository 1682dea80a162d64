//! Main module for depset library functionality

pub mod attrs;
pub mod errors;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod tree;
pub mod values;
