//! Resolving a finished selection polygon to candidate estates
//!
//! The backend call is fire-and-forget: it runs on its own task and its
//! result re-enters the session as a [`QueryMsg`] tagged with the generation
//! it was issued for.

pub mod catalog;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

use crate::domain::{Estate, Vertex};
use crate::session::{Msg, QueryMsg};

pub use catalog::CatalogSource;

/// Outbound search request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    /// Session generation this query belongs to; never sent on the wire
    #[serde(skip)]
    pub generation: u64,
    pub polygon: Vec<Vertex>,
}

/// Search response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub estates: Vec<Estate>,
}

/// Anything that can resolve a polygon to candidate estates
pub trait EstateSource: Send + Sync {
    fn search<'a>(&'a self, polygon: &'a [Vertex]) -> BoxFuture<'a, anyhow::Result<Vec<Estate>>>;
}

/// Run a query on a detached task and post the outcome back to the session
pub fn dispatch(
    source: Arc<dyn EstateSource>,
    request: QueryRequest,
    tx: Sender<Msg>,
) -> tokio::task::JoinHandle<()> {
    match serde_json::to_string(&request) {
        Ok(body) => log::debug!("Dispatching query {}: {}", request.generation, body),
        Err(err) => log::debug!("Dispatching query {} ({})", request.generation, err),
    }

    tokio::spawn(async move {
        let generation = request.generation;
        let msg = match source.search(&request.polygon).await {
            Ok(estates) => QueryMsg::Resolved {
                generation,
                estates,
            },
            Err(err) => {
                log::error!("Estate query {} failed: {:?}", generation, err);
                QueryMsg::Failed {
                    generation,
                    error: format!("{err:#}"),
                }
            }
        };
        if tx.send(Msg::Query(msg)).await.is_err() {
            log::error!("Failed to deliver query {} response", generation);
        }
    })
}
