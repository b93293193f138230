//! sled 持久化的分數儲存

use crate::domain::model::{ReceiptId, ScoreRecord};
use crate::domain::ports::{ConfigProvider, ScoreStore};
use crate::utils::error::{ReceiptError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;

/// Tree holding `id -> points`
const POINTS_TREE: &str = "points";
const OPEN_RETRY_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct SledScoreStore {
    db: sled::Db,
    points: sled::Tree,
}

impl SledScoreStore {
    /// Opens the store described by `config`, either on disk or as a
    /// temporary database that is removed when the last handle is dropped.
    pub async fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        if config.temporary() {
            Self::temporary()
        } else {
            Self::open(config.db_path(), config.open_timeout()).await
        }
    }

    /// 開啟（或建立）資料庫；檔案鎖被佔用時在 `timeout` 內重試
    pub async fn open<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let deadline = Instant::now() + timeout;

        loop {
            match Self::open_with(sled::Config::new().path(path)) {
                Ok(store) => {
                    tracing::info!("Opened score store at {}", path.display());
                    return Ok(store);
                }
                Err(sled::Error::Io(e)) if Instant::now() < deadline => {
                    tracing::debug!("Score store at {} busy ({}), retrying", path.display(), e);
                    tokio::time::sleep(OPEN_RETRY_INTERVAL).await;
                }
                Err(e) => {
                    return Err(ReceiptError::persistence(format!(
                        "failed to open score store at {} within {:?}: {}",
                        path.display(),
                        timeout,
                        e
                    )));
                }
            }
        }
    }

    pub fn temporary() -> Result<Self> {
        let store = Self::open_with(sled::Config::new().temporary(true))?;
        tracing::info!("Opened temporary score store");
        Ok(store)
    }

    fn open_with(config: sled::Config) -> sled::Result<Self> {
        let db = config.open()?;
        let points = db.open_tree(POINTS_TREE)?;
        Ok(Self { db, points })
    }

    /// Number of recorded scores.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    async fn flush(&self) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.flush())
            .await
            .map_err(|e| ReceiptError::persistence(format!("flush task failed: {}", e)))??;
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for SledScoreStore {
    async fn record(&self, points: u64) -> Result<ReceiptId> {
        loop {
            let record = ScoreRecord::new(ReceiptId::generate(), points);

            // 只在 key 不存在時寫入，絕不覆蓋既有紀錄
            let swapped = self.points.compare_and_swap(
                record.key(),
                None as Option<&[u8]>,
                Some(record.encode_points()),
            )?;

            if swapped.is_err() {
                tracing::warn!("Generated id {} already exists, drawing a new one", record.id);
                continue;
            }

            self.flush().await?;
            tracing::debug!("Recorded {} points under {}", record.points, record.id);
            return Ok(record.id);
        }
    }

    async fn lookup(&self, id: &ReceiptId) -> Result<u64> {
        match self.points.get(ScoreRecord::key_for(id))? {
            Some(value) => Ok(ScoreRecord::decode(*id, &value)?.points),
            None => Err(ReceiptError::NotFound { id: id.to_string() }),
        }
    }
}
