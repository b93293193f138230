pub mod scoring;
pub mod service;

pub use crate::domain::model::{Item, Receipt, ReceiptId, ScoreRecord};
pub use crate::domain::ports::{ConfigProvider, ScoreStore};
pub use crate::utils::error::Result;
