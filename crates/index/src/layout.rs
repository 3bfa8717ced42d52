//! Positional column contracts for PubChemLite exports.
//!
//! The dataset has no self-describing schema: the index builder reads cells
//! by position. Any reordering of upstream columns needs a matching
//! [`ColumnLayout`] here.

use serde::{Deserialize, Serialize};

/// Column positions of every [`crate::Compound`] field in a dataset row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Exact number of cells every row must have.
    pub width: usize,
    pub identifier: Option<usize>,
    pub first_block: usize,
    pub pubmed_count: usize,
    pub patent_count: usize,
    pub molecular_formula: usize,
    pub smiles: usize,
    pub inchi: usize,
    pub inchikey: usize,
    pub monoisotopic_mass: Option<usize>,
    pub compound_name: usize,
}

impl ColumnLayout {
    /// Output of the trimming script: ten columns, deduplicated on
    /// identifier and InChIKey.
    pub const TRIMMED: ColumnLayout = ColumnLayout {
        width: 10,
        identifier: Some(0),
        first_block: 1,
        pubmed_count: 2,
        patent_count: 3,
        molecular_formula: 4,
        smiles: 5,
        inchi: 6,
        inchikey: 7,
        monoisotopic_mass: Some(8),
        compound_name: 9,
    };

    /// Raw PubChemLite CCSbase export with the FirstBlock column added.
    pub const CCSBASE: ColumnLayout = ColumnLayout {
        width: 13,
        identifier: None,
        first_block: 1,
        pubmed_count: 2,
        patent_count: 3,
        molecular_formula: 6,
        smiles: 7,
        inchi: 8,
        inchikey: 9,
        monoisotopic_mass: None,
        compound_name: 12,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::TRIMMED
    }
}

/// Named layouts selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetLayout {
    #[default]
    Trimmed,
    Ccsbase,
}

impl DatasetLayout {
    pub fn columns(self) -> ColumnLayout {
        match self {
            DatasetLayout::Trimmed => ColumnLayout::TRIMMED,
            DatasetLayout::Ccsbase => ColumnLayout::CCSBASE,
        }
    }
}
