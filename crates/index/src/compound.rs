use serde::{Deserialize, Serialize};

/// Number of characters in an InChIKey first block.
pub const FIRST_BLOCK_LEN: usize = 14;

/// One PubChemLite row.
///
/// Compounds are immutable once they enter a [`crate::CompoundIndex`]; the
/// index hands them out behind `Arc` so results can share them without
/// copying strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Compound {
    /// External identifier (PubChem CID) when the dataset layout carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub inchikey: String,
    /// Skeleton block of the InChIKey. Always consistent with `inchikey`.
    pub first_block: String,
    pub inchi: String,
    pub smiles: String,
    pub compound_name: String,
    pub molecular_formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monoisotopic_mass: Option<f64>,
    #[serde(default)]
    pub pubmed_count: u64,
    #[serde(default)]
    pub patent_count: u64,
}

impl Compound {
    /// Bring `first_block` in line with `inchikey`.
    ///
    /// An empty block is derived from the key. A block that disagrees with a
    /// non-empty key is replaced; the key is the source of truth.
    pub(crate) fn reconcile_first_block(&mut self) {
        if self.inchikey.is_empty() {
            return;
        }
        let derived = first_block_of(&self.inchikey);
        if self.first_block != derived {
            if !self.first_block.is_empty() {
                log::warn!(
                    "first block {} does not match InChIKey {}, using {}",
                    self.first_block,
                    self.inchikey,
                    derived
                );
            }
            self.first_block = derived.to_string();
        }
    }
}

/// Take the skeleton block of an InChIKey: the segment before the first
/// hyphen, truncated to [`FIRST_BLOCK_LEN`] characters.
///
/// Shorter segments are returned whole.
pub fn first_block_of(inchikey: &str) -> &str {
    let segment = inchikey.split('-').next().unwrap_or_default();
    segment.get(..FIRST_BLOCK_LEN).unwrap_or(segment)
}
