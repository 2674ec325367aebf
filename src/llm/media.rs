//! Media synthesis via the Gemini API: image generation, image editing, and
//! video generation with long-running-operation polling. Media is Gemini-only;
//! other providers get a clear error instead of a silent no-op.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::models::{AspectRatio, EditRequest, ImageRequest, ImageSize, VideoRequest};

/// Generate an image and return it as a base64 data URL.
pub async fn generate_image(
    client: &reqwest::Client,
    config: &LlmConfig,
    req: &ImageRequest,
) -> Result<String> {
    ensure_gemini(config)?;

    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part::text(&req.prompt)],
        }],
        generation_config: Some(GenerationConfig {
            image_config: Some(ImageConfig {
                image_size: req.size,
                aspect_ratio: req.aspect_ratio,
            }),
        }),
    };

    let response = generate_content(client, config, &config.image_model, &body).await?;
    first_inline_image(response).context("No image data in provider response")
}

/// Edit an existing image according to a prompt. `image` may be a data URL
/// or raw base64; the edited result comes back as a data URL.
pub async fn edit_image(
    client: &reqwest::Client,
    config: &LlmConfig,
    req: &EditRequest,
) -> Result<String> {
    ensure_gemini(config)?;

    let (mime_type, data) = split_data_url(&req.image);

    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![
                Part::inline(mime_type, data),
                Part::text(&req.prompt),
            ],
        }],
        generation_config: None,
    };

    let response = generate_content(client, config, &config.edit_model, &body).await?;
    first_inline_image(response).context("No edited image in provider response")
}

/// Generate a video. The provider returns a long-running operation which is
/// polled until done; the hosted video URI is returned. Polling is bounded by
/// `poll_attempts` so a hung operation cannot pin the request forever.
pub async fn generate_video(
    client: &reqwest::Client,
    config: &LlmConfig,
    req: &VideoRequest,
    poll_interval: Duration,
    poll_attempts: u32,
) -> Result<String> {
    ensure_gemini(config)?;

    let url = format!(
        "{}/v1beta/models/{}:predictLongRunning",
        config.base_url.trim_end_matches('/'),
        config.video_model
    );
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let body = PredictRequest {
        instances: vec![VideoInstance {
            prompt: req.prompt.clone(),
        }],
        parameters: VideoParameters {
            aspect_ratio: req.aspect_ratio,
            resolution: req.resolution,
            sample_count: 1,
        },
    };

    let resp = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await
        .context("Failed to start video generation")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Video generation returned {status}: {body}");
    }

    let started: OperationHandle = resp
        .json()
        .await
        .context("Failed to parse video operation handle")?;

    poll_video_operation(client, config, &started.name, poll_interval, poll_attempts).await
}

async fn poll_video_operation(
    client: &reqwest::Client,
    config: &LlmConfig,
    operation: &str,
    interval: Duration,
    attempts: u32,
) -> Result<String> {
    let url = format!(
        "{}/v1beta/{operation}",
        config.base_url.trim_end_matches('/')
    );
    let api_key = config.api_key.as_deref().unwrap_or_default();

    for _ in 0..attempts {
        tokio::time::sleep(interval).await;

        let resp = client
            .get(&url)
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .context("Failed to poll video operation")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Video operation poll returned {status}: {body}");
        }

        let op: VideoOperation = resp
            .json()
            .await
            .context("Failed to parse video operation")?;

        if op.done {
            if let Some(err) = &op.error {
                anyhow::bail!("Video generation failed: {}", err.message);
            }
            return extract_video_uri(op).context("Video operation finished without a video");
        }
    }

    anyhow::bail!("Video generation did not complete within {attempts} polls")
}

fn ensure_gemini(config: &LlmConfig) -> Result<()> {
    if config.provider != "gemini" {
        anyhow::bail!(
            "Media generation requires the gemini provider (configured: {})",
            config.provider
        );
    }
    Ok(())
}

/// Split a data URL into (mime type, base64 payload). Raw base64 input is
/// passed through with an assumed PNG mime type.
fn split_data_url(image: &str) -> (String, String) {
    if let Some(rest) = image.strip_prefix("data:") {
        if let Some(comma) = rest.find(";base64,") {
            let mime = &rest[..comma];
            let data = &rest[comma + ";base64,".len()..];
            if !mime.is_empty() {
                return (mime.to_string(), data.to_string());
            }
        }
    }
    ("image/png".to_string(), image.to_string())
}

fn first_inline_image(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .find_map(|p| p.inline_data)
        .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
}

async fn generate_content(
    client: &reqwest::Client,
    config: &LlmConfig,
    model: &str,
    body: &GenerateRequest,
) -> Result<GenerateResponse> {
    let url = format!(
        "{}/v1beta/models/{model}:generateContent",
        config.base_url.trim_end_matches('/')
    );
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let resp = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(body)
        .send()
        .await
        .context("Failed to call Gemini media API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Gemini media API returned {status}: {body}");
    }

    resp.json()
        .await
        .context("Failed to parse Gemini media response")
}

// ─── Wire types ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline(mime_type: String, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type, data }),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    image_size: ImageSize,
    aspect_ratio: AspectRatio,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Serialize)]
struct VideoInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    aspect_ratio: crate::models::VideoAspect,
    resolution: crate::models::VideoResolution,
    sample_count: u32,
}

#[derive(Deserialize)]
struct OperationHandle {
    name: String,
}

#[derive(Deserialize)]
struct VideoOperation {
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<OperationError>,
    #[serde(default)]
    response: Option<OperationResponse>,
}

#[derive(Deserialize)]
struct OperationError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Deserialize)]
struct VideoRef {
    uri: String,
}

fn extract_video_uri(op: VideoOperation) -> Option<String> {
    op.response?
        .generate_video_response?
        .generated_samples
        .into_iter()
        .next()?
        .video
        .map(|v| v.uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Data URL splitting ──────────────────────────────

    #[test]
    fn test_split_data_url() {
        let (mime, data) = split_data_url("data:image/jpeg;base64,AAAA");
        assert_eq!(mime, "image/jpeg");
        assert_eq!(data, "AAAA");
    }

    #[test]
    fn test_split_raw_base64_assumes_png() {
        let (mime, data) = split_data_url("AAAA");
        assert_eq!(mime, "image/png");
        assert_eq!(data, "AAAA");
    }

    #[test]
    fn test_split_data_url_missing_mime_assumes_png() {
        let (mime, _) = split_data_url("data:;base64,AAAA");
        assert_eq!(mime, "image/png");
    }

    // ─── Response extraction ─────────────────────────────

    #[test]
    fn test_first_inline_image_builds_data_url() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"here you go"},
                {"inlineData":{"mimeType":"image/png","data":"QUJD"}}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            first_inline_image(resp).unwrap(),
            "data:image/png;base64,QUJD"
        );
    }

    #[test]
    fn test_first_inline_image_none_when_text_only() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#)
                .unwrap();
        assert!(first_inline_image(resp).is_none());
    }

    #[test]
    fn test_extract_video_uri() {
        let op: VideoOperation = serde_json::from_str(
            r#"{"done":true,"response":{"generateVideoResponse":{
                "generatedSamples":[{"video":{"uri":"https://example/video.mp4"}}]}}}"#,
        )
        .unwrap();
        assert_eq!(extract_video_uri(op).unwrap(), "https://example/video.mp4");
    }

    #[test]
    fn test_extract_video_uri_empty_samples() {
        let op: VideoOperation = serde_json::from_str(
            r#"{"done":true,"response":{"generateVideoResponse":{"generatedSamples":[]}}}"#,
        )
        .unwrap();
        assert!(extract_video_uri(op).is_none());
    }

    #[test]
    fn test_operation_defaults_to_not_done() {
        let op: VideoOperation = serde_json::from_str(r#"{"name":"operations/abc"}"#).unwrap();
        assert!(!op.done);
    }

    // ─── Provider gating ─────────────────────────────────

    #[test]
    fn test_media_rejects_non_gemini_provider() {
        let mut config = LlmConfig::default();
        config.provider = "openai".to_string();
        assert!(ensure_gemini(&config).is_err());
        config.provider = "gemini".to_string();
        assert!(ensure_gemini(&config).is_ok());
    }

    #[test]
    fn test_image_config_serializes_display_names() {
        let cfg = ImageConfig {
            image_size: ImageSize::FourK,
            aspect_ratio: AspectRatio::Wide,
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["imageSize"], "4K");
        assert_eq!(json["aspectRatio"], "16:9");
    }
}
