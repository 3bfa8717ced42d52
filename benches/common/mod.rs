//! Common utilities for CTSLite benchmarks
//!
//! Generates synthetic PubChemLite-shaped datasets so benches do not depend on
//! the real multi-gigabyte export.

#![allow(dead_code)]

use ctslite::{Compound, CompoundIndex, IndexConfig};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Deterministic pseudo InChIKey for row `n`. Every `family` consecutive rows
/// share a first block.
pub fn synthetic_inchikey(n: usize, family: usize) -> String {
    let block = spell(n / family.max(1), 14);
    let second = spell(n, 10);
    format!("{block}-{second}-N")
}

fn spell(mut n: usize, width: usize) -> String {
    let mut out = vec![b'A'; width];
    for slot in out.iter_mut().rev() {
        *slot = LETTERS[n % LETTERS.len()];
        n /= LETTERS.len();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// A synthetic compound for row `n`.
pub fn synthetic_compound(n: usize) -> Compound {
    Compound {
        identifier: Some(n.to_string()),
        inchikey: synthetic_inchikey(n, 4),
        first_block: String::new(),
        inchi: format!("InChI=1S/C{n}H{}", 2 * n + 2),
        smiles: "C".repeat(n % 32 + 1) + &n.to_string(),
        compound_name: format!("compound-{n}"),
        molecular_formula: format!("C{}H{}", n % 64, n % 128),
        monoisotopic_mass: Some(n as f64 * 1.5),
        pubmed_count: (n % 100) as u64,
        patent_count: (n % 7) as u64,
    }
}

pub fn setup_index(count: usize) -> CompoundIndex {
    CompoundIndex::from_compounds((0..count).map(synthetic_compound))
}

/// Render `count` synthetic rows in the trimmed CSV layout.
pub fn synthetic_csv(count: usize) -> String {
    let mut out = String::from(
        "Identifier,FirstBlock,PubMed_Count,Patent_Count,MolecularFormula,SMILES,InChI,InChIKey,MonoisotopicMass,CompoundName\n",
    );
    for n in 0..count {
        let c = synthetic_compound(n);
        out.push_str(&format!(
            "{},,{},{},{},{},{},{},{},{}\n",
            n,
            c.pubmed_count,
            c.patent_count,
            c.molecular_formula,
            c.smiles,
            c.inchi,
            c.inchikey,
            c.monoisotopic_mass.unwrap_or_default(),
            c.compound_name
        ));
    }
    out
}

pub fn default_config() -> IndexConfig {
    IndexConfig::new()
}

/// Mixed batch touching every resolution path.
pub fn mixed_batch(count: usize) -> String {
    (0..count)
        .map(|n| match n % 5 {
            0 => synthetic_inchikey(n, 4),
            1 => format!("{}-ZZZZZZZZZZ-N", &synthetic_inchikey(n, 4)[..14]),
            2 => synthetic_compound(n).inchi,
            3 => synthetic_compound(n).smiles,
            _ => "zzz-unidentified".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
