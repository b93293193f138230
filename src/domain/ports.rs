use crate::domain::model::ReceiptId;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Durable `id -> points` mapping shared by every request handler.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Stores `points` under a freshly generated id. The id is only returned
    /// once the entry has been flushed to stable storage.
    async fn record(&self, points: u64) -> Result<ReceiptId>;

    /// Returns `ReceiptError::NotFound` when nothing was recorded under `id`.
    async fn lookup(&self, id: &ReceiptId) -> Result<u64>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn db_path(&self) -> &str;
    fn open_timeout(&self) -> Duration;
    fn temporary(&self) -> bool;
}
