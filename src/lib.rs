//! Workspace umbrella crate for CTSLite.
//!
//! Re-exports the compound index and the query resolver so callers can load
//! a PubChemLite export and answer identifier batches from one import.
//!
//! ```no_run
//! let index = ctslite::open_index("./data/PubChemLite.csv")?;
//! for result in ctslite::resolve_batch(&index, "O CH4")? {
//!     println!("{} -> {}", result.query, result.match_level);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use index::{
    ColumnLayout, Compound, CompoundIndex, DatasetLayout, FIRST_BLOCK_LEN, IndexConfig,
    IndexStats, LoadError, first_block_of,
};
pub use matcher::{
    MatchError, MatchLevel, QueryType, SingleResult, classify, flatten_matches, resolve_batch,
    resolve_one, split_queries,
};

use std::path::Path;

/// Load a dataset in the default (trimmed, comma separated) layout.
pub fn open_index(path: impl AsRef<Path>) -> Result<CompoundIndex, LoadError> {
    CompoundIndex::load(&IndexConfig::new().with_path(path.as_ref()))
}
