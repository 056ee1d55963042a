use std::path::PathBuf;
use thiserror::Error;

/// CLI固有のエラー
#[derive(Debug, Error)]
pub enum AppError {
    #[error("ファイルが見つかりません: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("出力先ディレクトリを作成できません: {path:?}")]
    OutputDirUnavailable { path: PathBuf },
}
