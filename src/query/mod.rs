//! # Query and Write Collaborators
//!
//! The gateway validates and authenticates series requests but never executes
//! them; parsing and the write path live behind these traits so the real
//! engine can be injected at wiring time.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::store::{Resource, ResourceStore, StoreError, StoreResult};

/// A parse failure in the admin query language.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseError(pub String);

/// A parsed query. Opaque to the gateway; execution happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub statements: Vec<String>,
}

/// Parses the query-language string carried by `GET /db/:db/series`.
pub trait QueryParser: Send + Sync {
    fn parse(&self, query: &str) -> Result<ParsedQuery, ParseError>;
}

/// One series batch in the write wire shape.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBatch {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub points: Vec<Vec<serde_json::Value>>,
}

/// Accepts decoded series batches for a database.
pub trait SeriesWriter: Send + Sync {
    fn write(&self, database: &str, batches: &[SeriesBatch]) -> StoreResult<()>;
}

/// Keyword-gated statement parser.
///
/// Accepts semicolon-separated statements that begin with a known verb; good
/// enough to validate admin tooling input and reject garbage. Not a real
/// grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicQueryParser;

const STATEMENT_VERBS: &[&str] = &["select", "list", "create", "drop", "delete", "explain"];

impl QueryParser for BasicQueryParser {
    fn parse(&self, query: &str) -> Result<ParsedQuery, ParseError> {
        let mut statements = Vec::new();
        for statement in query.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            let verb = statement
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_ascii_lowercase();
            if !STATEMENT_VERBS.contains(&verb.as_str()) {
                return Err(ParseError(format!(
                    "unexpected token {verb:?}, expected statement"
                )));
            }
            statements.push(statement.to_string());
        }
        if statements.is_empty() {
            return Err(ParseError("empty query".to_string()));
        }
        Ok(ParsedQuery { statements })
    }
}

/// Write-path stand-in: checks the database exists, then discards the batch.
pub struct NullSeriesWriter {
    store: Arc<dyn ResourceStore>,
}

impl NullSeriesWriter {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }
}

impl SeriesWriter for NullSeriesWriter {
    fn write(&self, database: &str, _batches: &[SeriesBatch]) -> StoreResult<()> {
        let known = self
            .store
            .databases()?
            .iter()
            .any(|db| db.name == database);
        if !known {
            return Err(StoreError::NotFound(Resource::Database));
        }
        Ok(())
    }
}
