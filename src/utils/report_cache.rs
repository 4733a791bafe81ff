use anyhow::Result;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::model::attendance::RecordBatch;
use crate::source::{AttendanceSource, SourceError};

const BATCH_KEY: &str = "attendance-batch";

/// Explicit freshness-window cache around the source fetch: cached batch
/// within the TTL, refetch on expiry. Owned by the app state, never a
/// process-wide static.
#[derive(Clone)]
pub struct ReportCache {
    batches: Cache<&'static str, Arc<RecordBatch>>,
}

impl ReportCache {
    pub fn new(freshness_window: Duration) -> Self {
        Self {
            batches: Cache::builder()
                .max_capacity(1)
                .time_to_live(freshness_window)
                .build(),
        }
    }

    pub async fn get_or_refresh(
        &self,
        source: &AttendanceSource,
    ) -> Result<Arc<RecordBatch>, SourceError> {
        if let Some(batch) = self.batches.get(BATCH_KEY).await {
            return Ok(batch);
        }

        let batch = Arc::new(refresh(source).await?);
        self.batches.insert(BATCH_KEY, batch.clone()).await;
        Ok(batch)
    }

    pub async fn invalidate(&self) {
        self.batches.invalidate(&BATCH_KEY).await;
    }
}

async fn refresh(source: &AttendanceSource) -> Result<RecordBatch, SourceError> {
    let mut batch = source.load().await?;

    // Identifier-less rows are dropped here as refresh policy; normalize
    // itself keeps cardinality.
    let before = batch.records.len();
    batch.records.retain(|record| !record.empid.is_empty());
    let dropped = before - batch.records.len();
    if dropped > 0 {
        log::info!("Dropped {} attendance rows with missing empid", dropped);
    }

    Ok(batch)
}

/// Prime the cache at startup so the first request does not pay the fetch.
pub async fn warmup_report_cache(cache: &ReportCache, source: &AttendanceSource) -> Result<()> {
    let batch = cache.get_or_refresh(source).await?;
    log::info!(
        "Report cache warmup complete: {} rows loaded",
        batch.records.len()
    );
    Ok(())
}
