//! Query classification.
//!
//! A first-match-wins cascade that separates well-formed identifiers from
//! near misses, so a typo gets an actionable message instead of a silent
//! "no match".

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::QueryType;

static INCHIKEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{14}-[A-Z]{10}-[A-Z]$").unwrap());

static LOOSE_INCHIKEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z]{12,16}-[A-Z]{9,11}-[A-Z]{0,2}$").unwrap());

const INCHI_PREFIX: &str = "InChI=";

/// First characters accepted for SMILES or formula queries.
const SMILES_OR_FORMULA_LEADS: &[char] = &['C', 'B', 'O', 'F', 'N', 'S', 'P', 'I'];

/// Classify a trimmed query token. Total: never fails.
pub fn classify(query: &str) -> QueryType {
    if INCHIKEY_PATTERN.is_match(query) {
        return QueryType::Inchikey;
    }
    if LOOSE_INCHIKEY_PATTERN.is_match(query) {
        return QueryType::BadInchikey;
    }
    if query.starts_with(INCHI_PREFIX) {
        return QueryType::Inchi;
    }
    if query
        .get(..INCHI_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(INCHI_PREFIX))
    {
        return QueryType::BadInchi;
    }
    match query.chars().next() {
        Some(c) if SMILES_OR_FORMULA_LEADS.contains(&c) || c.is_ascii_digit() => {
            QueryType::SmilesOrFormula
        }
        _ => QueryType::Unidentified,
    }
}
