//! レスポンス解析モジュール - 抽出結果のパースとファイル名生成

mod date;

pub use date::parse_bill_date;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// レシートから抽出された情報
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// 合計金額 (XXX.XX形式)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
    /// 日付 (DD-MM-YYYY形式)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// モデルが返したその他のフィールド（そのまま保存する）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExtractionResult {
    /// モデルの返答テキストを解析
    pub fn parse(reply: &str) -> Result<Self> {
        let body = strip_code_fences(reply);
        serde_json::from_str(body).context("モデルの返答が有効なJSONではありません")
    }

    /// 日付に基づいてJSONファイル名を生成
    /// フォーマット: lunch_receipt_[月]_[日]_[年].json
    pub fn json_filename(&self) -> String {
        let parsed = self.date.as_deref().and_then(parse_bill_date);
        if parsed.is_none() {
            warn!(
                "日付形式を認識できません: {:?}。フォールバック名を使用",
                self.date
            );
        }
        format!("{}.json", date::filename_stem_for_date(parsed))
    }

    /// インデント付きJSON文字列に変換
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("抽出結果のシリアライズに失敗")
    }
}

/// マークダウンのコードフェンスを除去
/// json_objectモードでも ```json ... ``` で包まれた返答が来ることがある
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// ユニークなファイル名を取得（同名ファイルがある場合は連番を付与）
pub fn get_unique_filename(directory: &std::path::Path, filename: &str) -> String {
    let path = std::path::Path::new(filename);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let ext = path.extension().and_then(|s| s.to_str());

    let mut final_name = filename.to_string();
    let mut counter = 1;

    while directory.join(&final_name).exists() {
        // 拡張子がない場合は付けない
        final_name = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        counter += 1;
    }

    final_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let reply = r#"{"total_price": "42.50", "date": "15-03-2024"}"#;
        let result = ExtractionResult::parse(reply).unwrap();

        assert_eq!(result.total_price.as_deref(), Some("42.50"));
        assert_eq!(result.date.as_deref(), Some("15-03-2024"));
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"total_price\": \"9.99\", \"date\": \"01-01-2025\"}\n```";
        let result = ExtractionResult::parse(reply).unwrap();

        assert_eq!(result.total_price.as_deref(), Some("9.99"));
    }

    #[test]
    fn test_parse_preserves_extra_fields() {
        let reply = r#"{"total_price": "18.00", "date": "02-06-2024", "currency": "EUR"}"#;
        let result = ExtractionResult::parse(reply).unwrap();

        assert_eq!(result.extra.get("currency").unwrap(), "EUR");
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        assert!(ExtractionResult::parse("not json").is_err());
        assert!(ExtractionResult::parse("").is_err());
    }

    #[test]
    fn test_json_filename_from_date() {
        let result = ExtractionResult {
            total_price: Some("42.50".to_string()),
            date: Some("15-03-2024".to_string()),
            ..Default::default()
        };

        // 月_日_年の順
        assert_eq!(result.json_filename(), "lunch_receipt_03_15_2024.json");
    }

    #[test]
    fn test_json_filename_fallback() {
        let missing = ExtractionResult::default();
        assert_eq!(missing.json_filename(), "lunch_receipt_unknown_date.json");

        let malformed = ExtractionResult {
            date: Some("March 15th".to_string()),
            ..Default::default()
        };
        assert_eq!(malformed.json_filename(), "lunch_receipt_unknown_date.json");
    }

    #[test]
    fn test_to_pretty_json() {
        let result = ExtractionResult {
            total_price: Some("42.50".to_string()),
            date: Some("15-03-2024".to_string()),
            ..Default::default()
        };

        let json = result.to_pretty_json().unwrap();
        assert!(json.contains("\"total_price\": \"42.50\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_get_unique_filename() {
        let dir = std::env::temp_dir().join("receipt_extractor_unique_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        // 衝突なしならそのまま
        assert_eq!(get_unique_filename(&dir, "a.json"), "a.json");

        // 既存ファイルがあれば連番付与
        std::fs::write(dir.join("a.json"), "{}").unwrap();
        assert_eq!(get_unique_filename(&dir, "a.json"), "a_1.json");

        std::fs::write(dir.join("a_1.json"), "{}").unwrap();
        assert_eq!(get_unique_filename(&dir, "a.json"), "a_2.json");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_get_unique_filename_without_extension() {
        let dir = std::env::temp_dir().join("receipt_extractor_unique_noext_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        // 拡張子なしの名前には連番だけを付ける
        std::fs::write(dir.join("scan"), b"x").unwrap();
        assert_eq!(get_unique_filename(&dir, "scan"), "scan_1");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
