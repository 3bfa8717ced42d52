//! Wire projections of match results.
//!
//! JSON is the serde form of [`SingleResult`]. CSV flattens every result to
//! one row per matched compound, or a single row with empty compound cells
//! when nothing matched.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use matcher::SingleResult;
use serde::Deserialize;

use crate::error::ServerResult;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

pub const CSV_HEADER: [&str; 13] = [
    "query",
    "query_type",
    "found_match",
    "match_level",
    "error_message",
    "inchikey",
    "first_block",
    "inchi",
    "smiles",
    "compound_name",
    "molecular_formula",
    "pubmed_count",
    "patent_count",
];

const COMPOUND_COLUMNS: usize = 8;

/// Requested output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Explicit `format` parameter first, then the `Accept` header.
    pub fn negotiate(explicit: Option<OutputFormat>, headers: &HeaderMap) -> Self {
        if let Some(format) = explicit {
            return format;
        }
        let accepts_csv = headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains(CSV_CONTENT_TYPE));
        if accepts_csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Json
        }
    }
}

/// Response envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// One object per query.
    #[default]
    Results,
    /// Deprecated: a flat list of matched compounds.
    Compounds,
}

/// Encode results as CSV bytes.
pub fn results_to_csv(results: &[SingleResult]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for result in results {
        let found = if result.found_match { "true" } else { "false" };
        let prefix = [
            result.query.as_str(),
            result.query_type.as_str(),
            found,
            result.match_level.label(),
            result.error_message.as_deref().unwrap_or_default(),
        ];

        if result.matches.is_empty() {
            let empty = std::iter::repeat("").take(COMPOUND_COLUMNS);
            writer.write_record(prefix.iter().copied().chain(empty))?;
            continue;
        }

        for compound in &result.matches {
            let pubmed_count = compound.pubmed_count.to_string();
            let patent_count = compound.patent_count.to_string();
            let cells = [
                compound.inchikey.as_str(),
                compound.first_block.as_str(),
                compound.inchi.as_str(),
                compound.smiles.as_str(),
                compound.compound_name.as_str(),
                compound.molecular_formula.as_str(),
                pubmed_count.as_str(),
                patent_count.as_str(),
            ];
            writer.write_record(prefix.iter().copied().chain(cells))?;
        }
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// CSV response with the `text/csv` content type.
pub fn csv_response(results: &[SingleResult]) -> ServerResult<Response> {
    let body = results_to_csv(results)?;
    Ok(([(CONTENT_TYPE, CSV_CONTENT_TYPE)], body).into_response())
}
