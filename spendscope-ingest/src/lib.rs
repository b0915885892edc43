//! spendscope-ingest: statement loading (CSV), per-source normalization,
//! and the batch fold over a statements directory.

pub mod types;
pub mod loader;
pub mod normalize;

pub use types::RawTable;
pub use loader::{
    Batch, LoadError, discover_statements, load_and_normalize, load_batch, load_statement,
};
pub use normalize::{NormalizeError, normalize};
