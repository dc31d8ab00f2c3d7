//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use factroot_core::{LearningOutcome, Query, QueryResult};

/// Format a single resolution
pub fn format_result(result: &QueryResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_result(result),
        OutputFormat::Cli => terminal::format_result(result),
    }
}

/// Format batch results, one entry per query in input order
pub fn format_batch(
    queries: &[Query],
    results: &[factroot_core::Result<QueryResult>],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => json::format_batch(queries, results),
        OutputFormat::Cli => terminal::format_batch(queries, results),
    }
}

/// Format the outcome of a verification
pub fn format_learning(outcome: &LearningOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_learning(outcome),
        OutputFormat::Cli => terminal::format_learning(outcome),
    }
}
