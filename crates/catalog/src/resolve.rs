//! Concurrent device-model name resolution

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::warn;

use transport::{Method, RestClient, Result, SessionCredentials};

use crate::cache::TtlCache;

/// Minimal catalog projection needed for order display.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModelSummary {
    pub device_model_id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Label used when a single reference's resolution fails; partial failure
/// must not fail the aggregate.
fn placeholder(device_model_id: i64) -> String {
    format!("Device #{}", device_model_id)
}

/// Catalog lookups with an explicit TTL cache.
#[derive(Clone)]
pub struct CatalogService {
    client: RestClient,
    models: Arc<TtlCache<Vec<DeviceModelSummary>>>,
    ttl: Duration,
}

impl CatalogService {
    pub fn new(client: RestClient) -> Self {
        Self::with_ttl(client, Duration::from_secs(300))
    }

    pub fn with_ttl(client: RestClient, ttl: Duration) -> Self {
        Self {
            client,
            models: Arc::new(TtlCache::new()),
            ttl,
        }
    }

    /// The device-model catalog, from cache unless stale or `force_refresh`.
    pub async fn device_models(
        &self,
        session: &SessionCredentials,
        force_refresh: bool,
    ) -> Result<Vec<DeviceModelSummary>> {
        if !force_refresh {
            if let Some(cached) = self.models.get(self.ttl) {
                return Ok(cached);
            }
        }
        let fetched: Option<Vec<DeviceModelSummary>> = self
            .client
            .fetch_optional(Method::Get, &["device-models"], &[], Some(session), None)
            .await?;
        let models = fetched.unwrap_or_default();
        self.models.put(models.clone());
        Ok(models)
    }

    /// One model's display name.
    pub async fn model_name(
        &self,
        session: &SessionCredentials,
        device_model_id: i64,
    ) -> Result<String> {
        let model: DeviceModelSummary = self
            .client
            .fetch(
                Method::Get,
                &["device-models", &device_model_id.to_string()],
                &[],
                Some(session),
                None,
            )
            .await?;
        Ok(model.name.unwrap_or_else(|| placeholder(device_model_id)))
    }

    /// Resolves display names for a set of distinct references.
    ///
    /// One lookup per distinct id is dispatched concurrently and joined. A
    /// failed lookup degrades that entry to a placeholder label; the
    /// aggregate always resolves.
    pub async fn resolve_model_names(
        &self,
        session: &SessionCredentials,
        device_model_ids: &[i64],
    ) -> HashMap<i64, String> {
        let mut distinct: Vec<i64> = device_model_ids.to_vec();
        distinct.sort_unstable();
        distinct.dedup();

        let lookups = distinct.iter().map(|&id| {
            let service = self.clone();
            let session = session.clone();
            async move {
                match service.model_name(&session, id).await {
                    Ok(name) => (id, name),
                    Err(err) => {
                        warn!(device_model_id = id, error = %err, "name lookup degraded to placeholder");
                        (id, placeholder(id))
                    }
                }
            }
        });

        join_all(lookups).await.into_iter().collect()
    }
}
