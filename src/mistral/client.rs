//! Mistral API クライアント

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const MISTRAL_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";

/// デフォルトの視覚モデル（無料枠。代わりに 'pixtral-large-latest' も利用可）
pub const DEFAULT_MODEL: &str = "pixtral-12b-2409";

/// システムプロンプト: JSON形式での返答を指示
const SYSTEM_PROMPT: &str = "Extract the text elements described by the user from the picture, \
     and return the result formatted as JSON in the following format: \
     { 'total_price': 'XXX.XX', 'date': 'DD-MM-YYYY' }";

/// ユーザープロンプト: 合計金額と日付の抽出指示
const USER_PROMPT: &str = "From this restaurant bill, extract the total price and date. \
     For the price, use XXX.XX format, and for the date use the DD-MM-YYYY format.";

/// Mistral チャットAPIクライアント
pub struct MistralClient {
    api_key: String,
    model: String,
    http_client: reqwest::Client,
}

impl MistralClient {
    /// 新しいクライアントを作成
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            http_client: reqwest::Client::new(),
        }
    }

    /// 環境変数 MISTRAL_API_KEY からクライアントを作成
    pub fn from_env(model: String) -> Result<Self> {
        let api_key = std::env::var("MISTRAL_API_KEY")
            .context("環境変数 MISTRAL_API_KEY が設定されていません")?;
        Ok(Self::new(api_key, model))
    }

    /// レシート画像を送信してモデルの返答テキストを取得
    pub async fn extract_receipt(&self, image_path: impl AsRef<Path>) -> Result<String> {
        let image_path = image_path.as_ref();
        let image_data = std::fs::read(image_path)
            .with_context(|| format!("画像ファイルの読み込みに失敗: {:?}", image_path))?;

        debug!("画像を読み込み: {} bytes", image_data.len());

        let base64_image = STANDARD.encode(&image_data);
        let data_url = format!(
            "data:{};base64,{}",
            mime_type_for(image_path),
            base64_image
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(data_url),
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            temperature: 0.0,
        };

        let response = self
            .http_client
            .post(MISTRAL_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Mistral APIリクエストに失敗")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Mistral API エラー ({}): {}", status, error_text);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Mistral APIレスポンスのパースに失敗")?;

        // 最初の候補の返答テキストを取り出す
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("Mistral APIレスポンスに choices がありません")?;

        Ok(content.trim().to_string())
    }
}

/// 拡張子からMIMEタイプを判定（不明な場合はJPEG扱い）
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// チャットリクエストのメッセージを構築
fn build_messages(data_url: String) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: vec![ContentPart::Text {
                text: SYSTEM_PROMPT.to_string(),
            }],
        },
        ChatMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text {
                    text: USER_PROMPT.to_string(),
                },
                ContentPart::ImageUrl { image_url: data_url },
            ],
        },
    ]
}

// Mistral API リクエスト/レスポンス構造体

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: String },
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}
