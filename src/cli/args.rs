use clap::Parser;
use std::path::PathBuf;

use crate::mistral::DEFAULT_MODEL;

/// コマンドライン引数
#[derive(Parser)]
#[command(
    name = "receipt_extractor",
    version,
    about = "レシート画像から合計金額と日付を抽出する"
)]
pub struct CliArgs {
    /// 処理するレシート画像のパス
    pub image_path: PathBuf,

    /// 使用するMistralモデル
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// JSONファイルの出力先ディレクトリ（デフォルト: カレントディレクトリ）
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// 元画像をリネームしない
    #[arg(long, default_value_t = false)]
    pub no_rename: bool,
}
