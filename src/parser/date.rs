//! 日付検証モジュール

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// モデルが返した日付 (DD-MM-YYYY形式) を検証してパース
/// 形式が一致しても暦上あり得ない日付 (32-13-2024 など) は None
pub fn parse_bill_date(date_str: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").ok()?;
    let caps = re.captures(date_str.trim())?;

    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// 日付からファイル名のベース部分を生成
/// フォーマット: lunch_receipt_[月]_[日]_[年]（日付不明時は lunch_receipt_unknown_date）
pub fn filename_stem_for_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(
            "lunch_receipt_{:02}_{:02}_{:04}",
            d.month(),
            d.day(),
            d.year()
        ),
        None => "lunch_receipt_unknown_date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_bill_date("15-03-2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_bill_date(" 01-12-2023 ").is_some());
    }

    #[test]
    fn test_rejects_wrong_format() {
        assert!(parse_bill_date("2024-03-15").is_none());
        assert!(parse_bill_date("5-3-2024").is_none());
        assert!(parse_bill_date("15/03/2024").is_none());
        assert!(parse_bill_date("").is_none());
    }

    #[test]
    fn test_rejects_impossible_date() {
        assert!(parse_bill_date("32-01-2024").is_none());
        assert!(parse_bill_date("01-13-2024").is_none());
        assert!(parse_bill_date("30-02-2024").is_none());
    }

    #[test]
    fn test_filename_stem_month_first() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(filename_stem_for_date(date), "lunch_receipt_03_15_2024");
    }

    #[test]
    fn test_filename_stem_fallback() {
        assert_eq!(filename_stem_for_date(None), "lunch_receipt_unknown_date");
    }
}
