//! Core data structures for papers and authors.

mod paper;

pub use paper::{Author, Paper};
