//! レシート抽出ツール - Mistral Vision API を使用したレシート情報抽出ツール
//!
//! # 機能
//! - レシート画像から Mistral チャットAPI (pixtral) でテキスト抽出
//! - 合計金額と日付 (DD-MM-YYYY) の取得
//! - 抽出結果のJSON保存
//! - 日付に基づく画像ファイルの自動リネーム

pub mod cli;
pub mod mistral;
pub mod output;
pub mod parser;

pub use parser::ExtractionResult;
