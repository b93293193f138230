use crate::core::scoring::{parse_purchase_date, parse_purchase_time};
use crate::domain::model::Receipt;
use crate::utils::error::{ReceiptError, Result};
use regex::Regex;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+(\.[0-9]+)?$").expect("numeric pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 收據的格式檢查，在計分之前執行
impl Validate for Receipt {
    fn validate(&self) -> Result<()> {
        if !self.purchase_date.is_empty()
            && parse_purchase_date(&self.purchase_date).is_none()
        {
            return Err(ReceiptError::validation(
                "purchaseDate",
                "field `purchaseDate` is not in the correct format",
            ));
        }

        if !self.purchase_time.is_empty()
            && parse_purchase_time(&self.purchase_time).is_none()
        {
            return Err(ReceiptError::validation(
                "purchaseTime",
                "field `purchaseTime` is not in the correct format",
            ));
        }

        validate_numeric("total", &self.total)?;

        for (index, item) in self.items.iter().enumerate() {
            let field = format!("items[{}].price", index);
            validate_numeric(&field, &item.price)?;
            if item.price.starts_with('-') {
                return Err(ReceiptError::validation(
                    field,
                    format!("price `{}` must not be negative", item.price),
                ));
            }
        }

        Ok(())
    }
}

pub fn validate_numeric(field_name: &str, value: &str) -> Result<()> {
    if NUMERIC.is_match(value) {
        Ok(())
    } else {
        Err(ReceiptError::validation(
            field_name,
            format!("field `{}` must be numeric, got `{}`", field_name, value),
        ))
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReceiptError::ConfigValidation {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReceiptError::ConfigValidation {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReceiptError::ConfigValidation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReceiptError::ConfigValidation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
