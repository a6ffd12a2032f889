//! Recommendation orchestrator
//!
//! Builds the lifestyle-advice prompt from the risk score and clinical
//! status list, then calls the external text-generation service. The
//! returned text is passed through as-is; whether it actually honors the
//! formatting constraints is the service's problem, not ours.

use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::RecommendationRequest;

/// Fixed disclaimer the generated text must end with
pub const DISCLAIMER: &str = "These recommendations are general and educational. \
Always consult a healthcare professional for personalized advice.";

/// Assemble the instruction prompt for the text-generation service
pub fn build_prompt(req: &RecommendationRequest, statuses: &[String]) -> String {
    format!(
        "You are a lifestyle coach for preventive health.\n\
         A patient has an estimated {:.2}% risk of {}. Patient age: {:.0}.\n\
         Clinical status summary: {}.\n\
         Write exactly 5 numbered lifestyle tips tailored to this profile, \
         120-150 words in total. Do not make any diagnostic or treatment claims. \
         End with this exact sentence: \"{}\"",
        req.risk_score,
        req.disease.label(),
        req.age,
        statuses.join("; "),
        DISCLAIMER,
    )
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

/// Generate lifestyle advice for the given request and status list.
///
/// Fails with `Config` when no API credential is configured (the call is
/// never attempted) and with `ExternalService` on any non-success upstream
/// status or transport failure. The credential travels as a query parameter,
/// so error messages are built from URL-stripped reqwest errors.
pub async fn generate(
    client: &reqwest::Client,
    config: &Config,
    req: &RecommendationRequest,
    statuses: &[String],
) -> AppResult<Vec<String>> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or_else(|| AppError::Config("GEMINI_API_KEY is not configured".to_string()))?;

    let prompt = build_prompt(req, statuses);
    let url = format!(
        "{}/models/{}:generateContent",
        config.gemini_api_url, config.gemini_model
    );

    tracing::debug!("Requesting recommendations for {}", req.disease.label());

    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });

    let response = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            AppError::ExternalService(format!(
                "text-generation request failed: {}",
                e.without_url()
            ))
        })?;

    let status = response.status();
    if !status.is_success() {
        let upstream_body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalService(format!(
            "text-generation service returned {}: {}",
            status, upstream_body
        )));
    }

    let parsed: GenerateResponse = response.json().await.map_err(|e| {
        AppError::ExternalService(format!(
            "Failed to parse text-generation response: {}",
            e.without_url()
        ))
    })?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| {
            AppError::ExternalService("text-generation response contained no candidates".to_string())
        })?;

    Ok(vec![text])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::clinical;
    use crate::models::Disease;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            disease: Disease::Kidney,
            risk_score: 63.27,
            age: 61.0,
            hba1c: 6.1,
            glucose: 112.0,
            bmi: 31.0,
            systolic_bp: 134.0,
            diastolic_bp: 84.0,
            egfr: 64.0,
            albumin_creatinine: Some(45.0),
            encounter_count: Some(7.0),
        }
    }

    fn test_config(key: Option<&str>) -> Config {
        Config {
            port: 8000,
            model_dir: "models".to_string(),
            gemini_api_key: key.map(str::to_string),
            gemini_api_url: "http://127.0.0.1:1/v1beta".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            environment: "development".to_string(),
        }
    }

    #[test]
    fn prompt_embeds_risk_disease_age_and_statuses() {
        let req = request();
        let statuses = clinical::classify(&req);
        let prompt = build_prompt(&req, &statuses);

        assert!(prompt.contains("63.27%"));
        assert!(prompt.contains("chronic kidney disease"));
        assert!(prompt.contains("Patient age: 61"));
        assert!(prompt.contains("exactly 5 numbered lifestyle tips"));
        assert!(prompt.contains("120-150 words"));
        assert!(prompt.contains(DISCLAIMER));
        for status in &statuses {
            assert!(prompt.contains(status.as_str()), "missing status {status}");
        }
    }

    #[tokio::test]
    async fn missing_credential_is_a_config_error() {
        let req = request();
        let statuses = clinical::classify(&req);
        let client = reqwest::Client::new();

        let err = generate(&client, &test_config(None), &req, &statuses)
            .await
            .unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_success_upstream_maps_to_external_service_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // One-shot upstream that rejects the call with a non-2xx status.
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let body = "rate limit exceeded";
            let response = format!(
                "HTTP/1.1 429 Too Many Requests\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        let mut config = test_config(Some("secret-key"));
        config.gemini_api_url = format!("http://{}/v1beta", addr);

        let req = request();
        let statuses = clinical::classify(&req);
        let client = reqwest::Client::new();

        let err = generate(&client, &config, &req, &statuses).await.unwrap_err();
        server.await.unwrap();

        match err {
            AppError::ExternalService(msg) => {
                assert!(msg.contains("429"), "missing upstream status in {msg}");
                assert!(msg.contains("rate limit exceeded"), "missing upstream body in {msg}");
                assert!(!msg.contains("secret-key"));
            }
            other => panic!("expected external service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_external_service_error() {
        let req = request();
        let statuses = clinical::classify(&req);
        let client = reqwest::Client::new();

        // Port 1 refuses connections; the key must not leak into the message.
        let err = generate(&client, &test_config(Some("secret-key")), &req, &statuses)
            .await
            .unwrap_err();
        match err {
            AppError::ExternalService(msg) => assert!(!msg.contains("secret-key")),
            other => panic!("expected external service error, got {:?}", other),
        }
    }
}
