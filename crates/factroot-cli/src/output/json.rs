//! JSON output formatter

use factroot_core::{LearningOutcome, Query, QueryResult};

fn result_value(result: &QueryResult) -> serde_json::Value {
    let mut value = serde_json::to_value(result).unwrap_or(serde_json::Value::Null);
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "provenance_id".to_string(),
            serde_json::Value::String(result.provenance_id()),
        );
        map.insert(
            "warning".to_string(),
            result
                .warning()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        );
    }
    value
}

pub fn format_result(result: &QueryResult) -> String {
    serde_json::to_string_pretty(&result_value(result)).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

pub fn format_batch(queries: &[Query], results: &[factroot_core::Result<QueryResult>]) -> String {
    let output: Vec<serde_json::Value> = queries
        .iter()
        .zip(results)
        .map(|(query, result)| match result {
            Ok(result) => serde_json::json!({
                "query": query.raw(),
                "result": result_value(result),
            }),
            Err(e) => serde_json::json!({
                "query": query.raw(),
                "error": e.to_string(),
            }),
        })
        .collect();

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string()) + "\n"
}

pub fn format_learning(outcome: &LearningOutcome) -> String {
    serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string()) + "\n"
}
