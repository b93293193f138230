use crate::core::scoring;
use crate::domain::model::{Receipt, ReceiptId};
use crate::domain::ports::ScoreStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// Scores receipts and keeps their points in a [`ScoreStore`].
#[derive(Clone)]
pub struct ReceiptService {
    store: Arc<dyn ScoreStore>,
}

impl ReceiptService {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Scores a structurally valid receipt and records the result.
    pub async fn process(&self, receipt: &Receipt) -> Result<ReceiptId> {
        tracing::debug!("Processing receipt: {:?}", receipt);

        let breakdown = scoring::score_breakdown(receipt);
        let points = breakdown.total();
        tracing::debug!(
            retailer = breakdown.retailer_name,
            round_dollar = breakdown.round_dollar,
            quarter_multiple = breakdown.quarter_multiple,
            item_pairs = breakdown.item_pairs,
            item_descriptions = breakdown.item_descriptions,
            odd_day = breakdown.odd_day,
            afternoon = breakdown.afternoon,
            "Scored receipt with {} points",
            points
        );

        let id = self.store.record(points).await?;
        tracing::info!("Receipt {} recorded with {} points", id, points);
        Ok(id)
    }

    pub async fn lookup(&self, id: &ReceiptId) -> Result<u64> {
        self.store.lookup(id).await
    }
}
