//! Per-type match strategies.
//!
//! Every resolver fills in a [`SingleResult`] in place and never fails.

use index::{first_block_of, CompoundIndex};

use crate::types::{MatchLevel, QueryType, SingleResult};

pub const MALFORMED_INCHIKEY: &str = "Malformed InChIKey, see documentation";
pub const MALFORMED_INCHI: &str = "Malformed InChI, see documentation";
pub const UNIDENTIFIED_QUERY: &str = "Invalid query type, could not identify";

/// Route a classified result to the strategy for its query type.
pub fn dispatch(index: &CompoundIndex, result: &mut SingleResult) {
    let query = result.query.clone();
    match result.query_type {
        QueryType::Inchi => resolve_inchi(index, &query, result),
        QueryType::Inchikey => resolve_inchikey(index, &query, result),
        QueryType::Smiles => resolve_smiles(index, &query, result),
        QueryType::Formula => resolve_formula(index, &query, result),
        QueryType::SmilesOrFormula => resolve_smiles_or_formula(index, &query, result),
        QueryType::BadInchikey => result.record_miss(MALFORMED_INCHIKEY),
        QueryType::BadInchi => result.record_miss(MALFORMED_INCHI),
        QueryType::Unidentified => result.record_miss(UNIDENTIFIED_QUERY),
    }
}

pub fn resolve_inchi(index: &CompoundIndex, query: &str, result: &mut SingleResult) {
    match index.by_inchi(query) {
        Some(compound) => {
            result.record_hit(MatchLevel::ExactInchi, std::slice::from_ref(compound))
        }
        None => result.record_miss(format!("no compound found for provided InChI: {query}")),
    }
}

/// Exact InChIKey first, then every compound sharing the query's first block.
///
/// The query must already have InChIKey shape.
pub fn resolve_inchikey(index: &CompoundIndex, query: &str, result: &mut SingleResult) {
    if let Some(compound) = index.by_inchikey(query) {
        result.record_hit(MatchLevel::ExactInchikey, std::slice::from_ref(compound));
        return;
    }

    let family = index.by_first_block(first_block_of(query));
    if family.is_empty() {
        result.record_miss(format!(
            "no compound found for provided InChIKey {query}. No first block matches found either"
        ));
    } else {
        result.record_hit(MatchLevel::FirstBlock, family);
    }
}

pub fn resolve_smiles(index: &CompoundIndex, query: &str, result: &mut SingleResult) {
    let hits = index.by_smiles(query);
    if hits.is_empty() {
        result.record_miss(format!("no compound found for provided SMILES: {query}"));
    } else {
        result.record_hit(MatchLevel::ExactSmiles, hits);
    }
}

pub fn resolve_formula(index: &CompoundIndex, query: &str, result: &mut SingleResult) {
    let hits = index.by_formula(query);
    if hits.is_empty() {
        result.record_miss(format!(
            "no compound found for provided molecular formula: {query}"
        ));
    } else {
        result.record_hit(MatchLevel::ExactFormula, hits);
    }
}

/// Ambiguous token: the formula mapping is consulted before SMILES, and the
/// result is relabelled to whichever one hit.
pub fn resolve_smiles_or_formula(index: &CompoundIndex, query: &str, result: &mut SingleResult) {
    let formula_hits = index.by_formula(query);
    if !formula_hits.is_empty() {
        result.query_type = QueryType::Formula;
        result.record_hit(MatchLevel::ExactFormula, formula_hits);
        return;
    }

    let smiles_hits = index.by_smiles(query);
    if !smiles_hits.is_empty() {
        result.query_type = QueryType::Smiles;
        result.record_hit(MatchLevel::ExactSmiles, smiles_hits);
        return;
    }

    result.record_miss(format!(
        "no compound found for provided SMILES or molecular formula: {query}"
    ));
}
