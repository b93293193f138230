//! Reward points for a receipt.
//!
//! Every rule is evaluated independently against the submitted receipt and the
//! results are summed. A field that fails to parse here only zeroes its own
//! rule; rejecting malformed input is the job of
//! [`Validate`](crate::utils::validation::Validate).

use crate::domain::model::{Item, Receipt};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::LazyLock;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

// chrono 接受較短的欄位，先檢查固定格式
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("time pattern is valid"));
// Unicode general category L* / N*
static LETTER_OR_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]").expect("letter pattern is valid"));

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

// 14:00 < t < 16:00，以分鐘計
const AFTERNOON_START: u32 = 14 * 60;
const AFTERNOON_END: u32 = 16 * 60;

/// Points earned by each rule for a single receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar: u64,
    pub quarter_multiple: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.retailer_name
            + self.round_dollar
            + self.quarter_multiple
            + self.item_pairs
            + self.item_descriptions
            + self.odd_day
            + self.afternoon
    }
}

pub fn compute_points(receipt: &Receipt) -> u64 {
    score_breakdown(receipt).total()
}

pub fn score_breakdown(receipt: &Receipt) -> PointsBreakdown {
    let total = parse_amount(&receipt.total);

    PointsBreakdown {
        retailer_name: retailer_points(&receipt.retailer),
        round_dollar: total
            .filter(|t| t.fract().is_zero())
            .map_or(0, |_| ROUND_DOLLAR_POINTS),
        quarter_multiple: total
            .filter(is_quarter_multiple)
            .map_or(0, |_| QUARTER_MULTIPLE_POINTS),
        item_pairs: ITEM_PAIR_POINTS * (receipt.items.len() / 2) as u64,
        item_descriptions: receipt.items.iter().map(description_points).sum(),
        odd_day: purchase_day_points(&receipt.purchase_date),
        afternoon: purchase_time_points(&receipt.purchase_time),
    }
}

/// Parses a `YYYY-MM-DD` purchase date.
pub fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Parses an `HH:MM` purchase time; the hour may be a single digit.
pub fn parse_purchase_time(raw: &str) -> Option<NaiveTime> {
    if !TIME_SHAPE.is_match(raw) {
        return None;
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.parse::<Decimal>().ok()
}

fn retailer_points(retailer: &str) -> u64 {
    LETTER_OR_DIGIT.find_iter(retailer).count() as u64
}

fn is_quarter_multiple(total: &Decimal) -> bool {
    (*total % Decimal::new(25, 2)).is_zero()
}

fn description_points(item: &Item) -> u64 {
    let trimmed_len = item.short_description.trim_matches(' ').len();
    if trimmed_len == 0 || trimmed_len % 3 != 0 {
        return 0;
    }

    parse_amount(&item.price)
        .and_then(|price| price.checked_mul(Decimal::new(2, 1)))
        .and_then(|points| points.ceil().to_u64())
        .unwrap_or(0)
}

fn purchase_day_points(purchase_date: &str) -> u64 {
    if purchase_date.is_empty() {
        return 0;
    }
    match parse_purchase_date(purchase_date) {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

fn purchase_time_points(purchase_time: &str) -> u64 {
    if purchase_time.is_empty() {
        return 0;
    }
    match parse_purchase_time(purchase_time) {
        Some(time) => {
            let minutes = time.hour() * 60 + time.minute();
            if minutes > AFTERNOON_START && minutes < AFTERNOON_END {
                AFTERNOON_POINTS
            } else {
                0
            }
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(retailer: &str, total: &str, items: Vec<Item>) -> Receipt {
        Receipt {
            retailer: retailer.to_string(),
            purchase_date: String::new(),
            purchase_time: String::new(),
            items,
            total: total.to_string(),
        }
    }

    #[test]
    fn test_retailer_counts_unicode_letters_and_digits() {
        assert_eq!(retailer_points("Target"), 6);
        assert_eq!(retailer_points("Target 1"), 7);
        assert_eq!(retailer_points("Target$"), 6);
        assert_eq!(retailer_points("M&M Corner Market"), 14);
        assert_eq!(retailer_points("Café 7"), 5);
        assert_eq!(retailer_points(""), 0);
        // क + ा：母音符號屬於 Mc，不算字母
        assert_eq!(retailer_points("\u{0915}\u{093E}"), 1);
        assert_eq!(retailer_points("\u{0661}\u{0662}"), 2);
        assert_eq!(retailer_points("e\u{0301}"), 1);
    }

    #[test]
    fn test_total_rules() {
        let round = score_breakdown(&receipt("", "35.00", vec![]));
        assert_eq!((round.round_dollar, round.quarter_multiple), (50, 25));

        let quarter = score_breakdown(&receipt("", "35.25", vec![]));
        assert_eq!((quarter.round_dollar, quarter.quarter_multiple), (0, 25));

        let neither = score_breakdown(&receipt("", "35.35", vec![]));
        assert_eq!((neither.round_dollar, neither.quarter_multiple), (0, 0));

        let unparsable = score_breakdown(&receipt("", "a35.00", vec![]));
        assert_eq!(unparsable.total(), 0);
    }

    #[test]
    fn test_description_rule() {
        // "Emils Cheese Pizza" 長度 18
        assert_eq!(description_points(&Item::new("Emils Cheese Pizza", "12.25")), 3);
        // 去掉前後空白後長度 24
        assert_eq!(
            description_points(&Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00")),
            3
        );
        assert_eq!(description_points(&Item::new("Mountain Dew 12PK", "6.49")), 0);
        assert_eq!(description_points(&Item::new("abc", "10.00")), 2);
        assert_eq!(description_points(&Item::new("abc", "not-a-price")), 0);
        assert_eq!(description_points(&Item::new("   ", "10.00")), 0);
        assert_eq!(description_points(&Item::new("", "10.00")), 0);
        assert_eq!(description_points(&Item::new("abc", "-10.00")), 0);
    }

    #[test]
    fn test_date_and_time_rules() {
        assert_eq!(purchase_day_points("2022-01-01"), 6);
        assert_eq!(purchase_day_points("2022-01-02"), 0);
        assert_eq!(purchase_day_points(""), 0);
        assert_eq!(purchase_day_points("2022-01-62"), 0);
        assert_eq!(purchase_day_points("22-01-01"), 0);
        assert_eq!(purchase_day_points("2022-1-1"), 0);

        assert_eq!(purchase_time_points("13:59"), 0);
        assert_eq!(purchase_time_points("14:00"), 0);
        assert_eq!(purchase_time_points("14:01"), 10);
        assert_eq!(purchase_time_points("15:59"), 10);
        assert_eq!(purchase_time_points("16:00"), 0);
        assert_eq!(purchase_time_points("26:01"), 0);
        assert_eq!(purchase_time_points("14:5"), 0);
        assert_eq!(purchase_time_points(""), 0);
    }

    #[test]
    fn test_breakdown_total_matches_compute_points() {
        let r = Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("abc", "10.00"), Item::new("Gatorade", "2.25")],
            total: "12.25".to_string(),
        };
        let breakdown = score_breakdown(&r);
        assert_eq!(
            breakdown,
            PointsBreakdown {
                retailer_name: 6,
                round_dollar: 0,
                quarter_multiple: 25,
                item_pairs: 5,
                item_descriptions: 2,
                odd_day: 6,
                afternoon: 10,
            }
        );
        assert_eq!(compute_points(&r), 54);
    }
}
