use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when scoring a photo
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{0}")]
    ApiError(String),

    #[error("No face detected in photo")]
    NoFaceDetected,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Something that turns a base64 photo into a numeric score
#[async_trait]
pub trait FaceScorer: Send + Sync {
    async fn analyze_face(&self, photo_base64: &str) -> Result<f64, ScorerError>;
}

/// Face++ detect API client
///
/// Scores a photo with the `beauty` attribute of the first detected face.
pub struct FaceppClient {
    endpoint: String,
    api_key: String,
    api_secret: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    faces: Vec<DetectedFace>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectedFace {
    attributes: Option<FaceAttributes>,
}

#[derive(Debug, Deserialize)]
struct FaceAttributes {
    beauty: Option<BeautyScore>,
}

#[derive(Debug, Deserialize)]
struct BeautyScore {
    male_score: f64,
    female_score: f64,
}

impl FaceppClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        api_secret: String,
        timeout: Duration,
    ) -> Result<Self, ScorerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            api_key,
            api_secret,
            client,
        })
    }
}

/// Mean of both beauty perspectives, rounded to the stored precision
fn combined_score(beauty: &BeautyScore) -> f64 {
    let mean = (beauty.male_score + beauty.female_score) / 2.0;
    (mean * 1000.0).round() / 1000.0
}

fn score_from_response(body: DetectResponse) -> Result<f64, ScorerError> {
    if let Some(message) = body.error_message {
        return Err(ScorerError::ApiError(message));
    }

    let face = body.faces.first().ok_or(ScorerError::NoFaceDetected)?;

    let beauty = face
        .attributes
        .as_ref()
        .and_then(|a| a.beauty.as_ref())
        .ok_or_else(|| ScorerError::InvalidResponse("Missing beauty attribute".into()))?;

    let score = combined_score(beauty);
    if !score.is_finite() {
        return Err(ScorerError::InvalidResponse(format!("Non-finite score {}", score)));
    }
    Ok(score)
}

#[async_trait]
impl FaceScorer for FaceppClient {
    async fn analyze_face(&self, photo_base64: &str) -> Result<f64, ScorerError> {
        let form = [
            ("api_key", self.api_key.as_str()),
            ("api_secret", self.api_secret.as_str()),
            ("image_base64", photo_base64),
            ("return_attributes", "beauty"),
        ];

        let response = self.client.post(&self.endpoint).form(&form).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Face++ reports failures as JSON with an error_message on any status
        match serde_json::from_str::<DetectResponse>(&text) {
            Ok(body) if status.is_success() || body.error_message.is_some() => {
                score_from_response(body)
            }
            Err(e) if status.is_success() => Err(ScorerError::InvalidResponse(e.to_string())),
            _ => {
                tracing::error!("Face++ returned {}: {}", status, text);
                Err(ScorerError::ApiError(format!("Face analysis failed: {}", status)))
            }
        }
    }
}
