//! レシート抽出ツール - メインエントリポイント

use anyhow::Result;
use clap::Parser;

use receipt_extractor::cli::{self, CliArgs};

fn main() -> Result<()> {
    // ロギング初期化
    tracing_subscriber::fmt::init();

    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    // 抽出パイプライン実行
    let args = CliArgs::parse();
    cli::run(args)
}
