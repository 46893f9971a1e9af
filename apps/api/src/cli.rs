use std::path::PathBuf;

use anyhow::Context;
use base64::Engine;
use hypr_transcribe_sarvam::{TranscribeConfig, TranscriptionResponse, normalize, transcribe_once};
use sarvam::{Mode, StreamingParams};

use crate::env::Env;

#[derive(clap::Args)]
pub struct TranscribeArgs {
    /// Audio file to transcribe
    pub path: PathBuf,

    /// BCP-47 language code; `unknown` auto-detects
    #[arg(short, long, default_value = hypr_transcribe_sarvam::UNKNOWN_LANGUAGE)]
    pub language: String,

    #[arg(short, long, default_value_t = Mode::Transcribe)]
    pub mode: Mode,

    #[arg(long, env = "SARVAM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

pub async fn transcribe(args: TranscribeArgs, env: &Env) -> anyhow::Result<()> {
    let result = run(args, TranscribeConfig::new(&env.sarvam)).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run(
    args: TranscribeArgs,
    mut config: TranscribeConfig,
) -> anyhow::Result<TranscriptionResponse> {
    if let Some(api_key) = args.api_key.filter(|k| !k.trim().is_empty()) {
        config = config.with_api_key(api_key);
    }

    let api_key = config
        .api_key
        .clone()
        .context("SARVAM_API_KEY is not configured")?;

    let audio = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    anyhow::ensure!(!audio.is_empty(), "{} is empty", args.path.display());

    let params = StreamingParams::default()
        .with_mode(args.mode)
        .with_language(args.language);

    tracing::info!(
        path = %args.path.display(),
        body_size_bytes = audio.len(),
        mode = %params.mode,
        language = %params.language_code,
        "cli_transcription_request"
    );

    let audio_b64 = base64::engine::general_purpose::STANDARD.encode(&audio);
    let upstream = config.upstream();
    let response = transcribe_once(upstream.as_ref(), &api_key, &params, &audio_b64).await?;

    Ok(normalize(&response))
}
