pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::{create_router, AppState};
pub use crate::adapters::storage::SledScoreStore;
pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{scoring::compute_points, service::ReceiptService};
pub use crate::domain::model::{Item, Receipt, ReceiptId};
pub use crate::domain::ports::{ConfigProvider, ScoreStore};
pub use crate::utils::error::{ReceiptError, Result};
