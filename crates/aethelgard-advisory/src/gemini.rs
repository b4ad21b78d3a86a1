//! Gemini `generateContent` backend over HTTPS.
//!
//! Request shape:
//!
//! ```text
//! POST {endpoint}/models/{model}:generateContent
//! x-goog-api-key: {api_key}
//!
//! { "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
//!   "systemInstruction": { "parts": [{ "text": ... }] },   // optional
//!   "generationConfig": { "temperature": 0.2 } }            // optional
//! ```
//!
//! The response text is the concatenation of the non-thought text parts of
//! the first candidate. A response with no candidates or no text parts maps
//! to `None`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use aethelgard_contracts::{
    advisory::GenerationRequest,
    error::{AethelgardError, AethelgardResult},
};

use crate::{config::AdvisoryConfig, traits::TextGenerator};

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

fn request_body(request: &GenerationRequest) -> GenerateContentBody<'_> {
    GenerateContentBody {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: &request.prompt }],
        }],
        system_instruction: request.params.system_instruction.as_deref().map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        }),
        generation_config: request
            .params
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let parts = &response.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts
        .iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// A `TextGenerator` backed by the Gemini REST API.
///
/// The HTTP client is built with no request timeout: a call runs until the
/// endpoint answers or the connection drops.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    http: Client,
    endpoint: String,
}

impl GeminiGenerator {
    pub fn new(endpoint: impl Into<String>) -> AethelgardResult<Self> {
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| AethelgardError::Transport {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AdvisoryConfig) -> AethelgardResult<Self> {
        Self::new(config.endpoint.clone())
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, api_key: &str, request: &GenerationRequest) -> AethelgardResult<Option<String>> {
        let url = self.url(&request.model);
        debug!(
            request_id = %request.request_id,
            kind = %request.kind,
            url = %url,
            "sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(request))
            .send()
            .map_err(|e| AethelgardError::Transport { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AethelgardError::ModelError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse =
            response.json().map_err(|e| AethelgardError::MalformedResponse {
                reason: e.to_string(),
            })?;

        Ok(extract_text(&parsed))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        sync::mpsc,
        thread,
    };

    use serde_json::json;

    use aethelgard_contracts::advisory::{AdvisoryKind, GenerationParams, RequestId};

    use super::*;

    fn request(params: GenerationParams) -> GenerationRequest {
        GenerationRequest {
            request_id: RequestId::new(),
            kind: AdvisoryKind::ClinicalSummary,
            model: "gemini-2.5-flash".to_string(),
            prompt: "Patient Context: stable".to_string(),
            params,
        }
    }

    /// Serve exactly one HTTP exchange on a loopback port.
    ///
    /// Returns the base URL and a receiver yielding the raw request text.
    fn one_shot_server(status_line: &'static str, body: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            // Read headers, then exactly Content-Length bytes of body.
            let header_end = loop {
                let n = stream.read(&mut buf).unwrap();
                raw.extend_from_slice(&buf[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while raw.len() < header_end + content_length {
                let n = stream.read(&mut buf).unwrap();
                raw.extend_from_slice(&buf[..n]);
            }

            let reply = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&raw).to_string()).unwrap();
        });

        (format!("http://{}/v1beta", addr), rx)
    }

    // ── Body mapping ─────────────────────────────────────────────────────────

    #[test]
    fn body_includes_persona_and_temperature() {
        let req = request(GenerationParams {
            temperature: Some(0.2),
            system_instruction: Some("Be concise.".to_string()),
        });
        let body = serde_json::to_value(request_body(&req)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Patient Context: stable");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be concise.");
        assert!(body["systemInstruction"].get("role").is_none());
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn body_omits_unset_params() {
        let body = serde_json::to_value(request_body(&request(GenerationParams::default()))).unwrap();
        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    // ── Response mapping ─────────────────────────────────────────────────────

    #[test]
    fn text_concatenates_parts_and_skips_thoughts() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "planning...", "thought": true },
                    { "text": "Summary: " },
                    { "text": "stable." }
                ]}
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(&parsed).as_deref(), Some("Summary: stable."));
    }

    #[test]
    fn no_candidates_means_no_text() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } })).unwrap();
        assert_eq!(extract_text(&parsed), None);

        let empty_parts: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "content": { "parts": [] } }] })).unwrap();
        assert_eq!(extract_text(&empty_parts), None);
    }

    // ── Live loopback exchange ───────────────────────────────────────────────

    #[test]
    fn generate_posts_to_model_path_with_key_header() {
        let reply = json!({ "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }] });
        let (base, seen) = one_shot_server("HTTP/1.1 200 OK", reply.to_string());

        let generator = GeminiGenerator::new(base).unwrap();
        let text = generator
            .generate("secret-key", &request(GenerationParams::default()))
            .unwrap();
        assert_eq!(text.as_deref(), Some("ok"));

        let raw = seen.recv().unwrap();
        assert!(raw.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(raw.contains("Patient Context: stable"));
    }

    #[test]
    fn non_success_status_is_a_model_error() {
        let (base, _seen) = one_shot_server(
            "HTTP/1.1 429 Too Many Requests",
            r#"{"error":"quota"}"#.to_string(),
        );

        let generator = GeminiGenerator::new(base).unwrap();
        let err = generator
            .generate("k", &request(GenerationParams::default()))
            .unwrap_err();
        match err {
            AethelgardError::ModelError { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("quota"));
            }
            other => panic!("expected ModelError, got {:?}", other),
        }
    }
}
