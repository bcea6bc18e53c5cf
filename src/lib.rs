//! Args core - chat-command argument parsing
//!
//! This crate turns the free-form text after a chat command name into a
//! typed, validated argument vector: a whitespace tokenizer, a bounded
//! backtracking matcher over positional specifications, per-kind token
//! validators, and a trie-plus-edit-distance fuzzy matcher for boss names.

pub mod fuzzy;
pub mod matcher;
pub mod tokenizer;
pub mod types;
pub mod validators;

pub use fuzzy::*;
pub use matcher::*;
pub use tokenizer::*;
pub use types::*;
pub use validators::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn args_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyArgParser>()?;
    Ok(())
}
