//! Bank statement pipeline: layout analysis, normalization and ledger assembly

pub mod layout;
pub mod metadata;
pub mod normalizer;
pub mod parser;

pub use layout::*;
pub use metadata::*;
pub use normalizer::*;
pub use parser::*;
