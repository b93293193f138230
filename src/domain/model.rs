use crate::utils::error::{ReceiptError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// JSON `null` 與缺少欄位同樣視為未提供
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 提交的收據；只用來計分，不會被保存
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default, deserialize_with = "null_as_default")]
    pub retailer: String,
    /// `YYYY-MM-DD`，空字串表示未提供
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_date: String,
    /// `HH:MM`（24 小時制），空字串表示未提供
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

/// Opaque identifier handed out for every processed receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(Uuid);

impl ReceiptId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ReceiptId {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ReceiptError::validation("id", "id is not a uuid"))
    }
}

/// A persisted `id -> points` entry.
///
/// On disk the key is the canonical id string and the value is the score as
/// decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    pub id: ReceiptId,
    pub points: u64,
}

impl ScoreRecord {
    pub fn new(id: ReceiptId, points: u64) -> Self {
        Self { id, points }
    }

    pub fn key(&self) -> Vec<u8> {
        Self::key_for(&self.id)
    }

    pub fn key_for(id: &ReceiptId) -> Vec<u8> {
        id.to_string().into_bytes()
    }

    pub fn encode_points(&self) -> Vec<u8> {
        self.points.to_string().into_bytes()
    }

    pub fn decode(id: ReceiptId, value: &[u8]) -> Result<Self> {
        let points = std::str::from_utf8(value)
            .ok()
            .and_then(|text| text.parse::<u64>().ok())
            .ok_or_else(|| {
                ReceiptError::persistence(format!("stored points for {} are not a decimal integer", id))
            })?;
        Ok(Self { id, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserializes_camel_case_with_defaults() {
        let receipt: Receipt = serde_json::from_str(
            r#"{
                "retailer": "Target",
                "purchaseTime": "13:01",
                "items": [{"shortDescription": "Mountain Dew 12PK", "price": "6.49"}],
                "total": "6.49"
            }"#,
        )
        .unwrap();

        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.purchase_date, "");
        assert_eq!(receipt.purchase_time, "13:01");
        assert_eq!(receipt.items, vec![Item::new("Mountain Dew 12PK", "6.49")]);
    }

    #[test]
    fn test_null_fields_are_treated_as_absent() {
        let receipt: Receipt = serde_json::from_str(
            r#"{
                "retailer": null,
                "purchaseDate": null,
                "purchaseTime": null,
                "items": [{"shortDescription": null, "price": "1.00"}],
                "total": "1.00"
            }"#,
        )
        .unwrap();

        assert_eq!(receipt.retailer, "");
        assert_eq!(receipt.purchase_date, "");
        assert_eq!(receipt.purchase_time, "");
        assert_eq!(receipt.items, vec![Item::new("", "1.00")]);

        let receipt: Receipt =
            serde_json::from_str(r#"{"items": null, "total": "1.00"}"#).unwrap();
        assert!(receipt.items.is_empty());
    }

    #[test]
    fn test_receipt_without_total_is_rejected() {
        let parsed: std::result::Result<Receipt, _> = serde_json::from_str(r#"{"retailer": "Target"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_receipt_id_parse_and_display() {
        let raw = "d49ae048-61cc-4236-a258-1c4b3c2362ab";
        let id: ReceiptId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);

        assert!("123".parse::<ReceiptId>().is_err());
        assert_ne!(ReceiptId::generate(), ReceiptId::generate());
    }

    #[test]
    fn test_score_record_decoding() {
        let id = ReceiptId::generate();
        let record = ScoreRecord::new(id, 103);
        assert_eq!(record.encode_points(), b"103".to_vec());
        assert_eq!(ScoreRecord::decode(id, b"103").unwrap(), record);
        assert!(ScoreRecord::decode(id, b"ten").is_err());
    }
}
