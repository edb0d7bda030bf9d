//! Estate source backed by a JSON listing file

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use std::path::Path;

use super::{EstateSource, QueryResponse};
use crate::domain::{Bounds, Estate, Vertex};

/// Listing file layout: either a bare array or a search response body
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Estate>),
    Response(QueryResponse),
}

/// In-memory listing catalog.
///
/// Like the search backend, it answers with every estate inside the
/// polygon's bounding box and leaves the exact test to the caller.
#[derive(Debug, Clone, Default)]
pub struct CatalogSource {
    estates: Vec<Estate>,
}

impl CatalogSource {
    pub fn new(estates: Vec<Estate>) -> Self {
        Self { estates }
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        let estates = match file {
            CatalogFile::List(estates) => estates,
            CatalogFile::Response(response) => response.estates,
        };
        log::info!("Loaded {} estates from {}", estates.len(), path.display());
        Ok(Self::new(estates))
    }

    pub fn len(&self) -> usize {
        self.estates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estates.is_empty()
    }

    /// Estates inside the bounding box of `polygon`
    pub fn within_bounds(&self, polygon: &[Vertex]) -> Vec<Estate> {
        let Some(bounds) = Bounds::from_vertices(polygon) else {
            return Vec::new();
        };
        self.estates
            .iter()
            .filter(|e| bounds.contains(e.position()))
            .cloned()
            .collect()
    }
}

impl EstateSource for CatalogSource {
    fn search<'a>(&'a self, polygon: &'a [Vertex]) -> BoxFuture<'a, Result<Vec<Estate>>> {
        async move { Ok(self.within_bounds(polygon)) }.boxed()
    }
}
