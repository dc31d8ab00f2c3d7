//! Terminal output formatter

use factroot_core::{LearningOutcome, Query, QueryResult};

pub fn format_result(result: &QueryResult) -> String {
    let mut output = String::new();

    if let Some(warning) = result.warning() {
        let rule = "!".repeat(warning.len().min(78));
        output.push_str(&format!("{}\n{}\n{}\n", rule, warning, rule));
    }

    output.push_str(&format!("Answer:     {}\n", result.answer));
    output.push_str(&format!(
        "Confidence: {:>3}%\n",
        (result.confidence * 100.0).round() as u32
    ));
    output.push_str(&format!(
        "Source:     {}\n",
        result.label.source.description()
    ));
    output.push_str(&format!("Citation:   {}\n", result.citation));
    output.push_str(&format!("Provenance: {}\n", result.provenance_id()));

    if !result.reasoning.is_empty() {
        output.push_str("\nReasoning:\n");
        for line in result.reasoning.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    if !result.alternatives.is_empty() {
        output.push_str("\nAlternatives:\n");
        for alt in &result.alternatives {
            output.push_str(&format!(
                "  {:>3}% {} ({}: {})\n",
                (alt.confidence * 100.0).round() as u32,
                alt.value,
                alt.source.description(),
                alt.citation
            ));
            output.push_str(&format!("       {}\n", alt.reason));
        }
    }

    output
}

pub fn format_batch(queries: &[Query], results: &[factroot_core::Result<QueryResult>]) -> String {
    let mut output = String::new();

    for (i, (query, result)) in queries.iter().zip(results).enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("[{}] {}\n", i + 1, query.raw()));
        match result {
            Ok(result) => output.push_str(&format_result(result)),
            Err(e) => output.push_str(&format!("Error: {}\n", e)),
        }
    }

    output
}

pub fn format_learning(outcome: &LearningOutcome) -> String {
    match outcome {
        LearningOutcome::Upgraded {
            original,
            upgraded,
            citation,
        } => format!(
            "Upgraded {} -> {}\nCitation: {}\n",
            original, upgraded, citation
        ),
        LearningOutcome::Corrected {
            original_answer,
            correct_answer,
            correct_source,
            citation,
        } => format!(
            "Corrected {:?} -> {:?}\nSource:   {}\nCitation: {}\n",
            original_answer,
            correct_answer,
            correct_source.description(),
            citation
        ),
        LearningOutcome::Inconclusive { message } => format!("Inconclusive: {}\n", message),
    }
}
