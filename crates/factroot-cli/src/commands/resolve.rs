//! Resolve command

use crate::app::{OutputFormat, ResolveArgs};
use crate::output;
use anyhow::Result;
use factroot_core::error::exit_codes;
use factroot_core::{Config, Query};

pub async fn run(args: ResolveArgs, config: &Config, format: OutputFormat) -> Result<i32> {
    let text = args.query.join(" ");
    let mut query = Query::new(text);
    if let Some(sector) = args.sector {
        query = query.with_sector(sector);
    }
    if let Some(data_type) = args.data_type {
        query = query.with_data_type(data_type);
    }
    if args.deterministic_only {
        query = query.deterministic_only();
    }

    let resolver = super::build_resolver(config)?;
    let result = resolver.resolve(&query).await?;

    print!("{}", output::format_result(&result, format));

    if args.deterministic_only && !result.is_deterministic {
        return Ok(exit_codes::NOT_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}
