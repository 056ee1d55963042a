//! ファイル出力モジュール - JSON保存と画像リネーム

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::parser::{get_unique_filename, ExtractionResult};

/// 抽出結果をJSONファイルとして保存
pub fn save_json(
    result: &ExtractionResult,
    output_dir: &Path,
    json_filename: &str,
) -> Result<PathBuf> {
    let unique_name = get_unique_filename(output_dir, json_filename);
    let json_path = output_dir.join(&unique_name);

    std::fs::write(&json_path, result.to_pretty_json()?)
        .with_context(|| format!("JSONの保存に失敗: {:?}", json_path))?;

    info!("JSONを保存: {:?}", json_path);
    Ok(json_path)
}

/// 元画像をJSONファイル名に合わせてリネーム（拡張子は維持）
pub fn rename_image(image_path: &Path, json_filename: &str) -> Result<PathBuf> {
    let new_name = renamed_image_filename(image_path, json_filename);

    let base_dir = image_path.parent().unwrap_or_else(|| Path::new("."));
    let unique_name = get_unique_filename(base_dir, &new_name);
    let new_path = base_dir.join(&unique_name);

    std::fs::rename(image_path, &new_path)
        .with_context(|| format!("画像のリネームに失敗: {:?} -> {:?}", image_path, new_path))?;

    info!("画像をリネーム: {:?}", new_path);
    Ok(new_path)
}

/// リネーム後の画像ファイル名を計算
fn renamed_image_filename(image_path: &Path, json_filename: &str) -> String {
    let stem = Path::new(json_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(json_filename);

    match image_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    }
}
