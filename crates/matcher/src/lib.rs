//! # CTSLite Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the compound index (`index`). It turns free-form
//! query text into classified identifier queries and resolves each one
//! through an ordered cascade of exact-match strategies.
//!
//! ## Resolution cascade
//!
//! | classified as | strategy | match level |
//! |---------------|----------|-------------|
//! | `inchikey` | exact key, then shared first block | `Exact InChIKey` / `First Block` |
//! | `inchi` | exact InChI | `Exact InChI` |
//! | `smiles_or_formula` | formula, then SMILES | `Exact Formula` / `Exact SMILES` |
//! | `bad_inchikey`, `bad_inchi`, `unidentified` | none | `No Match` |
//!
//! A miss is reported inside its [`SingleResult`]; one query never aborts
//! its siblings. The only request-level failure is an input with no tokens
//! ([`MatchError::EmptyQuery`]).
//!
//! ## Example Usage
//!
//! ```
//! use index::{Compound, CompoundIndex};
//! use ctslite_matcher::{resolve_batch, MatchLevel};
//!
//! let index = CompoundIndex::from_compounds([Compound {
//!     identifier: None,
//!     inchikey: "XLYOFNOQVPJJNP-UHFFFAOYSA-N".into(),
//!     first_block: String::new(),
//!     inchi: "InChI=1S/H2O/h1H2".into(),
//!     smiles: "O".into(),
//!     compound_name: "Water".into(),
//!     molecular_formula: "H2O".into(),
//!     monoisotopic_mass: None,
//!     pubmed_count: 0,
//!     patent_count: 0,
//! }]);
//!
//! let results = resolve_batch(&index, "O XLYOFNOQVPJJNP-AAAAAAAAAA-N").unwrap();
//! assert_eq!(results[0].match_level, MatchLevel::ExactSmiles);
//! assert_eq!(results[1].match_level, MatchLevel::FirstBlock);
//! ```

pub mod classify;
mod engine;
pub mod resolve;
pub mod types;

pub use classify::classify;
pub use engine::{flatten_matches, resolve_batch, resolve_one, split_queries};
pub use types::{MatchError, MatchLevel, QueryType, SingleResult};
