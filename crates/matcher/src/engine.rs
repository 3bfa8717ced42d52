use std::sync::Arc;

use index::{Compound, CompoundIndex};

use crate::classify::classify;
use crate::resolve::dispatch;
use crate::types::{MatchError, SingleResult};


/// Split raw request text into query tokens.
///
/// Tokens are separated by runs of whitespace; commas are legal inside SMILES
/// and InChI so they never delimit. One layer of surrounding double quotes is
/// removed and empty tokens are dropped.
pub fn split_queries(raw: &str) -> Vec<&str> {
    raw.split_whitespace()
        .map(strip_quotes)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

fn strip_quotes(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(token)
}

/// Classify and resolve a single query token.
pub fn resolve_one(index: &CompoundIndex, query: &str) -> SingleResult {
    let query_type = classify(query);
    log::debug!("query {query:?} identified as {query_type}");

    let mut result = SingleResult::new(query, query_type);
    dispatch(index, &mut result);

    log::debug!(
        "query {:?} resolved: found={} level={} matches={}",
        result.query,
        result.found_match,
        result.match_level,
        result.matches.len()
    );
    result
}

/// Resolve every token of a request, in input order.
///
/// Only a request with no tokens at all is an error; a token that matches
/// nothing still yields a result and never affects its siblings.
pub fn resolve_batch(index: &CompoundIndex, raw: &str) -> Result<Vec<SingleResult>, MatchError> {
    let queries = split_queries(raw);
    if queries.is_empty() {
        return Err(MatchError::EmptyQuery);
    }

    Ok(queries
        .into_iter()
        .map(|query| resolve_one(index, query))
        .collect())
}

/// Legacy projection: every matched compound of every result, in order.
pub fn flatten_matches(results: &[SingleResult]) -> Vec<Arc<Compound>> {
    results
        .iter()
        .flat_map(|result| result.matches.iter().cloned())
        .collect()
}
