use std::fmt;
use std::sync::Arc;

use index::Compound;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier family a raw query was classified into.
///
/// `Smiles` and `Formula` are never produced by [`crate::classify`] directly;
/// a `SmilesOrFormula` query is relabelled to one of them once resolution
/// decides which mapping it hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Inchikey,
    /// Looks like an InChIKey but fails the strict shape check.
    BadInchikey,
    Inchi,
    /// Has an `InChI=` prefix with the wrong casing.
    BadInchi,
    SmilesOrFormula,
    Smiles,
    Formula,
    Unidentified,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::Inchikey => "inchikey",
            QueryType::BadInchikey => "bad_inchikey",
            QueryType::Inchi => "inchi",
            QueryType::BadInchi => "bad_inchi",
            QueryType::SmilesOrFormula => "smiles_or_formula",
            QueryType::Smiles => "smiles",
            QueryType::Formula => "formula",
            QueryType::Unidentified => "unidentified",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MatchLevel {
    #[serde(rename = "Exact InChIKey")]
    ExactInchikey,
    /// InChIKey miss that fell back to the skeleton block.
    #[serde(rename = "First Block")]
    FirstBlock,
    #[serde(rename = "Exact InChI")]
    ExactInchi,
    #[serde(rename = "Exact SMILES")]
    ExactSmiles,
    #[serde(rename = "Exact Formula")]
    ExactFormula,
    #[serde(rename = "No Match")]
    NoMatch,
}

impl MatchLevel {
    pub fn label(self) -> &'static str {
        match self {
            MatchLevel::ExactInchikey => "Exact InChIKey",
            MatchLevel::FirstBlock => "First Block",
            MatchLevel::ExactInchi => "Exact InChI",
            MatchLevel::ExactSmiles => "Exact SMILES",
            MatchLevel::ExactFormula => "Exact Formula",
            MatchLevel::NoMatch => "No Match",
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving one query token.
///
/// A miss is a normal value (`found_match == false` with an
/// `error_message`), never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleResult {
    pub query: String,
    pub query_type: QueryType,
    pub found_match: bool,
    pub match_level: MatchLevel,
    pub matches: Vec<Arc<Compound>>,
    pub error_message: Option<String>,
}

impl SingleResult {
    /// Unresolved result for a classified query.
    pub fn new(query: impl Into<String>, query_type: QueryType) -> Self {
        Self {
            query: query.into(),
            query_type,
            found_match: false,
            match_level: MatchLevel::NoMatch,
            matches: Vec::new(),
            error_message: None,
        }
    }

    pub(crate) fn record_hit(&mut self, level: MatchLevel, matches: &[Arc<Compound>]) {
        self.found_match = true;
        self.match_level = level;
        self.matches = matches.to_vec();
        self.error_message = None;
    }

    pub(crate) fn record_miss(&mut self, message: impl Into<String>) {
        self.found_match = false;
        self.match_level = MatchLevel::NoMatch;
        self.matches.clear();
        self.error_message = Some(message.into());
    }

    /// Rows this result occupies in a tabular projection.
    pub fn row_count(&self) -> usize {
        self.matches.len().max(1)
    }
}

/// Request-level failures. Per-query misses are never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("query was empty, expected one or more whitespace-separated identifiers")]
    EmptyQuery,
}
