//! Verify command

use crate::app::{OutputFormat, VerifyArgs};
use crate::output;
use anyhow::{Context, Result};
use factroot_core::error::exit_codes;
use factroot_core::{process_verification, FactRootError, QueryResult, Source, VerificationOutcome};

pub async fn run(args: VerifyArgs, format: OutputFormat) -> Result<i32> {
    let content = std::fs::read_to_string(&args.result)
        .with_context(|| format!("reading {}", args.result.display()))?;
    let result: QueryResult = serde_json::from_str(&content).map_err(|e| {
        FactRootError::InvalidInput(format!("{} is not a result: {}", args.result.display(), e))
    })?;
    check_stored_result(&result)?;

    let outcome = review_outcome(args)?;
    let learning = process_verification(&result, outcome)?;

    print!("{}", output::format_learning(&learning, format));
    Ok(exit_codes::SUCCESS)
}

/// A stored result must still satisfy the flagging invariants
fn check_stored_result(result: &QueryResult) -> Result<(), FactRootError> {
    let source = result.label.source;
    if result.is_deterministic != source.is_deterministic() {
        return Err(FactRootError::InvalidInput(format!(
            "result {} is marked {} but attributed to {}",
            result.provenance_id(),
            if result.is_deterministic {
                "deterministic"
            } else {
                "non-deterministic"
            },
            source
        )));
    }
    Ok(())
}

fn review_outcome(args: VerifyArgs) -> Result<VerificationOutcome, FactRootError> {
    if args.inconclusive {
        return Ok(VerificationOutcome::NoDeterministicSource);
    }

    let citation = args
        .citation
        .ok_or_else(|| FactRootError::InvalidInput("--citation is required".to_string()))?;

    if let Some(source) = args.confirm {
        return Ok(VerificationOutcome::Confirmed {
            source: authoritative(source)?,
            citation,
        });
    }

    match (args.correct, args.source) {
        (Some(value), Some(source)) => Ok(VerificationOutcome::Corrected {
            value,
            source: authoritative(source)?,
            citation,
        }),
        _ => Err(FactRootError::InvalidInput(
            "one of --confirm, --correct or --inconclusive is required".to_string(),
        )),
    }
}

fn authoritative(source: Source) -> Result<Source, FactRootError> {
    if source.is_deterministic() {
        Ok(source)
    } else {
        Err(FactRootError::InvalidInput(format!(
            "{} is not an authoritative source",
            source
        )))
    }
}
