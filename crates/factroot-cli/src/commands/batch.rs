//! Batch command

use crate::app::{BatchArgs, OutputFormat};
use crate::output;
use anyhow::{Context, Result};
use factroot_core::error::exit_codes;
use factroot_core::{Config, Query};

pub async fn run(args: BatchArgs, config: &Config, format: OutputFormat) -> Result<i32> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let queries: Vec<Query> = parse_queries(&content)
        .into_iter()
        .map(|text| {
            let query = Query::new(text);
            if args.deterministic_only {
                query.deterministic_only()
            } else {
                query
            }
        })
        .collect();

    if queries.is_empty() {
        tracing::warn!("No queries in {}", args.file.display());
    }

    let resolver = super::build_resolver(config)?;
    let results = resolver.resolve_batch(&queries).await;

    let failures = results.iter().filter(|r| r.is_err()).count();
    print!("{}", output::format_batch(&queries, &results, format));

    if failures > 0 {
        tracing::warn!("{} of {} queries failed", failures, queries.len());
        return Ok(exit_codes::GENERAL_ERROR);
    }
    Ok(exit_codes::SUCCESS)
}

/// One query per non-blank line; `#` starts a comment line
fn parse_queries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_queries_skips_blanks_and_comments() {
        let content = "# fatigue set\nIEC 60364 touch voltage\n\n   \n  6061-T6 yield strength  \n#done\n";
        assert_eq!(
            parse_queries(content),
            vec!["IEC 60364 touch voltage", "6061-T6 yield strength"]
        );
    }
}
