//! # CTSLite Index
//!
//! This crate builds the in-memory compound index that every CTSLite query is
//! resolved against. The index is constructed once, in a single linear pass
//! over a PubChemLite export, and is never mutated afterwards. It is safe to
//! share across threads behind an `Arc` with no locking.
//!
//! ## Lookup structures
//!
//! | key | cardinality | duplicates |
//! |-----|-------------|------------|
//! | InChIKey | unique | last row wins |
//! | InChI | unique | last row wins |
//! | SMILES | one-to-many | appended in dataset order |
//! | FirstBlock | one-to-many | appended in dataset order |
//! | molecular formula | one-to-many | appended in dataset order |
//!
//! Empty cells are never used as keys.
//!
//! ## Example Usage
//!
//! ```
//! use ctslite_index::{CompoundIndex, IndexConfig};
//!
//! let data = "\
//! Identifier,FirstBlock,PubMed_Count,Patent_Count,MolecularFormula,SMILES,InChI,InChIKey,MonoisotopicMass,CompoundName
//! 962,XLYOFNOQVPJJNP,10,2,H2O,O,InChI=1S/H2O/h1H2,XLYOFNOQVPJJNP-UHFFFAOYSA-N,18.010565,Water
//! ";
//!
//! let index = CompoundIndex::from_reader(data.as_bytes(), &IndexConfig::new()).unwrap();
//! let water = index.by_inchikey("XLYOFNOQVPJJNP-UHFFFAOYSA-N").unwrap();
//! assert_eq!(water.compound_name, "Water");
//! assert_eq!(index.by_first_block("XLYOFNOQVPJJNP").len(), 1);
//! ```

mod compound;
mod layout;

pub use compound::{first_block_of, Compound, FIRST_BLOCK_LEN};
pub use layout::{ColumnLayout, DatasetLayout};

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use hashbrown::HashMap;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while building a [`CompoundIndex`].
///
/// Any of these is fatal: a partially built index is never returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read dataset at line {line}: {message}")]
    Read { line: u64, message: String },
    #[error("malformed row at line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("invalid value {value:?} in column {column} at line {line}")]
    InvalidField {
        line: u64,
        column: usize,
        value: String,
    },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        LoadError::Read {
            line,
            message: err.to_string(),
        }
    }
}

/// Config for building the index.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Dataset location, used by [`CompoundIndex::load`].
    pub path: PathBuf,
    /// Positional mapping of dataset columns onto compound fields.
    pub layout: ColumnLayout,
    /// Cell delimiter byte.
    pub delimiter: u8,
    /// Whether the first row is a header to skip.
    pub has_headers: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/PubChemLite.csv"),
            layout: ColumnLayout::default(),
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Sizes of the index and its lookup tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub compounds: usize,
    pub inchikeys: usize,
    pub inchis: usize,
    pub smiles: usize,
    pub first_blocks: usize,
    pub formulas: usize,
}

/// Immutable multi-keyed compound index.
#[derive(Debug, Default)]
pub struct CompoundIndex {
    /// Compounds in dataset order.
    compounds: Vec<Arc<Compound>>,
    by_inchikey: HashMap<String, Arc<Compound>>,
    by_inchi: HashMap<String, Arc<Compound>>,
    by_smiles: HashMap<String, Vec<Arc<Compound>>>,
    by_first_block: HashMap<String, Vec<Arc<Compound>>>,
    by_formula: HashMap<String, Vec<Arc<Compound>>>,
}

impl CompoundIndex {
    /// Open the dataset at `cfg.path` and build the index from it.
    pub fn load(cfg: &IndexConfig) -> Result<Self, LoadError> {
        let file = File::open(&cfg.path).map_err(|source| LoadError::Open {
            path: cfg.path.clone(),
            source,
        })?;
        log::info!(
            "Loading PubChemLite into memory using {}",
            cfg.path.display()
        );
        Self::from_reader(file, cfg)
    }

    /// Build the index from any delimited source.
    pub fn from_reader<R: io::Read>(reader: R, cfg: &IndexConfig) -> Result<Self, LoadError> {
        let start = Instant::now();
        let mut rows = csv::ReaderBuilder::new()
            .delimiter(cfg.delimiter)
            .has_headers(cfg.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut index = Self::default();
        for record in rows.records() {
            let record = record?;
            let compound = parse_row(&record, &cfg.layout)?;
            index.insert(compound);
        }

        log::info!(
            "Loaded {} compounds, took {:.2} seconds",
            index.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(index)
    }

    /// Build the index from compounds already in memory, in iteration order.
    pub fn from_compounds<I>(compounds: I) -> Self
    where
        I: IntoIterator<Item = Compound>,
    {
        let mut index = Self::default();
        for compound in compounds {
            index.insert(compound);
        }
        index
    }

    fn insert(&mut self, mut compound: Compound) {
        compound.reconcile_first_block();
        let compound = Arc::new(compound);

        if !compound.inchikey.is_empty() {
            self.by_inchikey
                .insert(compound.inchikey.clone(), Arc::clone(&compound));
        }
        if !compound.inchi.is_empty() {
            self.by_inchi
                .insert(compound.inchi.clone(), Arc::clone(&compound));
        }
        push_keyed(&mut self.by_smiles, &compound.smiles, &compound);
        push_keyed(&mut self.by_first_block, &compound.first_block, &compound);
        push_keyed(&mut self.by_formula, &compound.molecular_formula, &compound);

        self.compounds.push(compound);
    }

    pub fn by_inchikey(&self, inchikey: &str) -> Option<&Arc<Compound>> {
        self.by_inchikey.get(inchikey)
    }

    pub fn by_inchi(&self, inchi: &str) -> Option<&Arc<Compound>> {
        self.by_inchi.get(inchi)
    }

    /// All compounds with exactly this SMILES, in dataset order.
    pub fn by_smiles(&self, smiles: &str) -> &[Arc<Compound>] {
        lookup_many(&self.by_smiles, smiles)
    }

    /// All compounds sharing this InChIKey skeleton, in dataset order.
    pub fn by_first_block(&self, first_block: &str) -> &[Arc<Compound>] {
        lookup_many(&self.by_first_block, first_block)
    }

    /// All compounds with exactly this molecular formula, in dataset order.
    pub fn by_formula(&self, formula: &str) -> &[Arc<Compound>] {
        lookup_many(&self.by_formula, formula)
    }

    pub fn compounds(&self) -> &[Arc<Compound>] {
        &self.compounds
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            compounds: self.compounds.len(),
            inchikeys: self.by_inchikey.len(),
            inchis: self.by_inchi.len(),
            smiles: self.by_smiles.len(),
            first_blocks: self.by_first_block.len(),
            formulas: self.by_formula.len(),
        }
    }
}

fn push_keyed(
    map: &mut HashMap<String, Vec<Arc<Compound>>>,
    key: &str,
    compound: &Arc<Compound>,
) {
    if key.is_empty() {
        return;
    }
    map.entry_ref(key).or_default().push(Arc::clone(compound));
}

fn lookup_many<'a>(map: &'a HashMap<String, Vec<Arc<Compound>>>, key: &str) -> &'a [Arc<Compound>] {
    map.get(key).map(Vec::as_slice).unwrap_or(&[])
}

fn parse_row(record: &csv::StringRecord, layout: &ColumnLayout) -> Result<Compound, LoadError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    if record.len() != layout.width {
        return Err(LoadError::ColumnCount {
            line,
            expected: layout.width,
            found: record.len(),
        });
    }

    let cell = |column: usize| record.get(column).unwrap_or_default().trim();
    let text = |column: usize| cell(column).to_string();
    let optional_text = |column: Option<usize>| {
        column
            .map(cell)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let count = |column: usize| -> Result<u64, LoadError> {
        let value = cell(column);
        if value.is_empty() {
            return Ok(0);
        }
        value.parse().map_err(|_| LoadError::InvalidField {
            line,
            column,
            value: value.to_string(),
        })
    };

    let monoisotopic_mass = match layout.monoisotopic_mass {
        Some(column) if !cell(column).is_empty() => {
            let value = cell(column);
            Some(value.parse::<f64>().map_err(|_| LoadError::InvalidField {
                line,
                column,
                value: value.to_string(),
            })?)
        }
        _ => None,
    };

    Ok(Compound {
        identifier: optional_text(layout.identifier),
        inchikey: text(layout.inchikey),
        first_block: text(layout.first_block),
        inchi: text(layout.inchi),
        smiles: text(layout.smiles),
        compound_name: text(layout.compound_name),
        molecular_formula: text(layout.molecular_formula),
        monoisotopic_mass,
        pubmed_count: count(layout.pubmed_count)?,
        patent_count: count(layout.patent_count)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Identifier,FirstBlock,PubMed_Count,Patent_Count,MolecularFormula,SMILES,InChI,InChIKey,MonoisotopicMass,CompoundName";

    fn mock_csv(rows: &[&str]) -> String {
        let mut data = String::from(HEADER);
        for row in rows {
            data.push('\n');
            data.push_str(row);
        }
        data.push('\n');
        data
    }

    fn water_and_methane() -> String {
        mock_csv(&[
            "962,MYFAKEINCHIKEY,10,2,H2O,O,InChI=1S/H2O/h1H2,MYFAKEINCHIKEY-ISRIGHTHER-E,18.010565,Water",
            "297,MYFAKEINCHIKEY,18,7,CH4,C,InChI=1S/CH4/h1H4,MYFAKEINCHIKEY-ANOTHERONE-E,16.0313,Methane",
        ])
    }

    fn build(data: &str) -> CompoundIndex {
        CompoundIndex::from_reader(data.as_bytes(), &IndexConfig::new()).expect("index builds")
    }

    #[test]
    fn parses_every_field_of_trimmed_layout() {
        let index = build(&water_and_methane());
        let water = index.by_inchikey("MYFAKEINCHIKEY-ISRIGHTHER-E").unwrap();

        assert_eq!(water.identifier.as_deref(), Some("962"));
        assert_eq!(water.first_block, "MYFAKEINCHIKEY");
        assert_eq!(water.pubmed_count, 10);
        assert_eq!(water.patent_count, 2);
        assert_eq!(water.molecular_formula, "H2O");
        assert_eq!(water.smiles, "O");
        assert_eq!(water.inchi, "InChI=1S/H2O/h1H2");
        assert_eq!(water.monoisotopic_mass, Some(18.010565));
        assert_eq!(water.compound_name, "Water");
    }

    #[test]
    fn every_compound_is_reachable_through_its_keys() {
        let index = build(&water_and_methane());
        assert_eq!(index.len(), 2);

        for compound in index.compounds() {
            assert_eq!(index.by_inchikey(&compound.inchikey), Some(compound));
            assert_eq!(index.by_inchi(&compound.inchi), Some(compound));
            assert!(index.by_first_block(&compound.first_block).contains(compound));
            assert!(index.by_smiles(&compound.smiles).contains(compound));
            assert!(index.by_formula(&compound.molecular_formula).contains(compound));
        }
    }

    #[test]
    fn first_block_lists_keep_dataset_order() {
        let index = build(&water_and_methane());
        let names: Vec<&str> = index
            .by_first_block("MYFAKEINCHIKEY")
            .iter()
            .map(|c| c.compound_name.as_str())
            .collect();
        assert_eq!(names, ["Water", "Methane"]);
    }

    #[test]
    fn duplicate_smiles_are_all_preserved() {
        let index = build(&mock_csv(&[
            "1,AAAAAAAAAAAAAA,0,0,C2H6O,CCO,InChI=1S/A,AAAAAAAAAAAAAA-AAAAAAAAAA-A,,Ethanol",
            "2,BBBBBBBBBBBBBB,0,0,C2H6O,CCO,InChI=1S/B,BBBBBBBBBBBBBB-BBBBBBBBBB-B,,Ethanol isotopologue",
        ]));
        let hits = index.by_smiles("CCO");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].identifier.as_deref(), Some("1"));
        assert_eq!(hits[1].identifier.as_deref(), Some("2"));
        assert_eq!(index.by_formula("C2H6O").len(), 2);
    }

    #[test]
    fn duplicate_unique_keys_keep_last_row() {
        let index = build(&mock_csv(&[
            "1,AAAAAAAAAAAAAA,0,0,X,X,InChI=1S/dup,AAAAAAAAAAAAAA-AAAAAAAAAA-A,,First",
            "2,AAAAAAAAAAAAAA,0,0,Y,Y,InChI=1S/dup,AAAAAAAAAAAAAA-AAAAAAAAAA-A,,Second",
        ]));
        assert_eq!(index.len(), 2);
        assert_eq!(
            index
                .by_inchikey("AAAAAAAAAAAAAA-AAAAAAAAAA-A")
                .unwrap()
                .compound_name,
            "Second"
        );
        assert_eq!(index.by_inchi("InChI=1S/dup").unwrap().compound_name, "Second");
        assert_eq!(index.by_first_block("AAAAAAAAAAAAAA").len(), 2);
    }

    #[test]
    fn empty_cells_are_not_keys() {
        let index = build(&mock_csv(&[",,,,,,,,,Nameless"]));
        assert_eq!(index.len(), 1);
        assert!(index.by_smiles("").is_empty());
        assert!(index.by_inchikey("").is_none());
        let stats = index.stats();
        assert_eq!(stats.compounds, 1);
        assert_eq!(stats.smiles, 0);
        assert_eq!(stats.first_blocks, 0);
        assert_eq!(index.compounds()[0].pubmed_count, 0);
        assert!(index.compounds()[0].identifier.is_none());
    }

    #[test]
    fn missing_first_block_is_derived_from_inchikey() {
        let index = build(&mock_csv(&[
            "1,,0,0,H2O,O,InChI=1S/H2O/h1H2,XLYOFNOQVPJJNP-UHFFFAOYSA-N,,Water",
        ]));
        assert_eq!(index.by_first_block("XLYOFNOQVPJJNP").len(), 1);
    }

    #[test]
    fn quoted_cells_may_contain_delimiters() {
        let index = build(&mock_csv(&[
            "5,AAAAAAAAAAAAAA,0,0,C3H8,CCC,\"InChI=1S/C3H8/c1-3-2/h3H2,1-2H3\",AAAAAAAAAAAAAA-AAAAAAAAAA-A,44.06,Propane",
        ]));
        assert!(index.by_inchi("InChI=1S/C3H8/c1-3-2/h3H2,1-2H3").is_some());
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let err = CompoundIndex::from_reader(
            mock_csv(&["1,2,3"]).as_bytes(),
            &IndexConfig::new(),
        )
        .unwrap_err();
        match err {
            LoadError::ColumnCount {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 10);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let err = CompoundIndex::from_reader(
            mock_csv(&["1,,many,0,,,,,,Bad"]).as_bytes(),
            &IndexConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: 2, .. }));
    }

    #[test]
    fn ccsbase_layout_reads_wide_rows() {
        let data = "\
Identifier,FirstBlock,PubMed,Patent,a,b,MolecularFormula,SMILES,InChI,InChIKey,c,d,CompoundName
962,XLYOFNOQVPJJNP,10,2,x,y,H2O,O,InChI=1S/H2O/h1H2,XLYOFNOQVPJJNP-UHFFFAOYSA-N,z,w,Water
";
        let cfg = IndexConfig::new().with_layout(DatasetLayout::Ccsbase.columns());
        let index = CompoundIndex::from_reader(data.as_bytes(), &cfg).unwrap();
        let water = index.by_smiles("O").first().unwrap();
        assert_eq!(water.compound_name, "Water");
        assert!(water.identifier.is_none());
        assert!(water.monoisotopic_mass.is_none());
    }

    #[test]
    fn tab_delimited_source_is_supported() {
        let data = water_and_methane().replace(',', "\t");
        let cfg = IndexConfig::new().with_delimiter(b'\t');
        let index = CompoundIndex::from_reader(data.as_bytes(), &cfg).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(water_and_methane().as_bytes()).unwrap();

        let cfg = IndexConfig::new().with_path(file.path());
        let index = CompoundIndex::load(&cfg).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn load_reports_missing_file() {
        let cfg = IndexConfig::new().with_path("/definitely/not/here.csv");
        let err = CompoundIndex::load(&cfg).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn from_compounds_matches_reader_build() {
        let from_csv = build(&water_and_methane());
        let rebuilt = CompoundIndex::from_compounds(
            from_csv.compounds().iter().map(|c| Compound::clone(c)),
        );
        assert_eq!(rebuilt.stats(), from_csv.stats());
    }
}
