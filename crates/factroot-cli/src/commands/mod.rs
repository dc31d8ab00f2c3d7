//! CLI command implementations

pub mod batch;
pub mod resolve;
pub mod verify;

use anyhow::{Context, Result};
use factroot_core::{CatalogSource, Config, HttpPredictor, Resolver, Source};
use std::path::Path;
use std::sync::Arc;

/// Wire the resolver from the configured catalogs and predictor.
///
/// A source with no catalog configured answers nothing.
pub fn build_resolver(config: &Config) -> Result<Resolver> {
    let kb = &config.knowledge_base;
    let standards = open_catalog(Source::StandardsBody, kb.standards.as_deref())?;
    let datasheets = open_catalog(Source::Datasheet, kb.datasheets.as_deref())?;
    let handbooks = open_catalog(Source::Handbook, kb.handbooks.as_deref())?;
    let predictor = HttpPredictor::from_config(config.predictor.clone())?;

    let resolver = Resolver::builder()
        .standards(Arc::new(standards))
        .datasheets(Arc::new(datasheets))
        .handbooks(Arc::new(handbooks))
        .predictor(Arc::new(predictor))
        .config(config.engine.clone())
        .build()?;
    Ok(resolver)
}

fn open_catalog(source: Source, path: Option<&Path>) -> Result<CatalogSource> {
    match path {
        Some(path) => {
            let catalog = CatalogSource::from_path(source, path)
                .with_context(|| format!("loading {} catalog {}", source, path.display()))?;
            tracing::debug!("{} catalog: {} entries", source, catalog.len());
            Ok(catalog)
        }
        None => {
            tracing::debug!("No {} catalog configured", source);
            Ok(CatalogSource::new(source, Vec::new()))
        }
    }
}
