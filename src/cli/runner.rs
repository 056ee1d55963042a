//! 抽出パイプラインの実行

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::info;

use crate::mistral::MistralClient;
use crate::output::{rename_image, save_json};
use crate::parser::ExtractionResult;

use super::args::CliArgs;
use super::errors::AppError;

/// 抽出パイプラインを実行
/// 読み込み → エンコード → API呼び出し → 解析 → JSON保存 → リネーム
pub fn run(args: CliArgs) -> Result<()> {
    if !args.image_path.exists() {
        return Err(AppError::FileNotFound {
            path: args.image_path,
        }
        .into());
    }

    // APIキーはネットワークアクセスの前に確認する
    let client = MistralClient::from_env(args.model)?;

    let output_dir = args.output_dir.unwrap_or_else(|| PathBuf::from("."));
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).map_err(|_| AppError::OutputDirUnavailable {
            path: output_dir.clone(),
        })?;
    }

    // クライアントは非同期なのでランタイム上で実行する
    let runtime = Runtime::new().context("Tokioランタイムの作成に失敗")?;
    let reply = runtime.block_on(client.extract_receipt(&args.image_path))?;

    info!("モデルの返答:\n{}", reply);

    let result = ExtractionResult::parse(&reply)?;
    let json_filename = result.json_filename();

    save_json(&result, &output_dir, &json_filename)?;

    if args.no_rename {
        info!("--no-rename 指定のため画像はリネームしません");
    } else {
        rename_image(&args.image_path, &json_filename)?;
    }

    Ok(())
}
