//! Mistral API モジュール

mod client;

pub use client::{MistralClient, DEFAULT_MODEL};
