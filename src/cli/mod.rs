//! CLIレイヤー
//!
//! 引数パース (`args`)、CLI固有のエラー型 (`errors`)、
//! 抽出パイプラインの実行 (`runner`) を定義する。
//! ライブラリとして組み込む場合は `mistral` / `parser` / `output`
//! モジュールを直接使用すること。

pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
