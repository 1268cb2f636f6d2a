//! HTTP client for the remote analysis/generation service.
//!
//! The service owns the scoring algorithm, breach database, and entropy
//! source; this client only speaks its three-endpoint contract. Any non-2xx
//! response or transport error surfaces as a plain `anyhow` error and callers
//! treat all of them uniformly.

use crate::model::{AnalysisReport, ClientConfig, GeneratedPassword, GeneratorKind};
use anyhow::{Context, Result};
use serde_json::json;

pub struct SuiteClient {
    http: reqwest::Client,
    base_url: String,
}

impl SuiteClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.request_timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST /check_password` with the raw password in the JSON body.
    pub async fn check_password(&self, password: &str) -> Result<AnalysisReport> {
        let url = format!("{}/check_password", self.base_url);
        let report = self
            .http
            .post(&url)
            .json(&json!({ "password": password }))
            .send()
            .await
            .context("send check_password request")?
            .error_for_status()
            .context("check_password returned an error status")?
            .json::<AnalysisReport>()
            .await
            .context("decode check_password response")?;
        Ok(report)
    }

    /// `GET /generate_password?length=N` or the quantum variant.
    /// Length policy (minimums, character sets) is enforced server-side.
    pub async fn generate_password(&self, kind: GeneratorKind, length: u32) -> Result<String> {
        let endpoint = match kind {
            GeneratorKind::Standard => "generate_password",
            GeneratorKind::Quantum => "generate_quantum_secure_password",
        };
        let url = format!("{}/{}", self.base_url, endpoint);
        let body = self
            .http
            .get(&url)
            .query(&[("length", length)])
            .send()
            .await
            .with_context(|| format!("send {endpoint} request"))?
            .error_for_status()
            .with_context(|| format!("{endpoint} returned an error status"))?
            .json::<GeneratedPassword>()
            .await
            .with_context(|| format!("decode {endpoint} response"))?;
        Ok(body.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SuiteClient {
        SuiteClient::new(&ClientConfig {
            base_url: server.uri(),
            request_timeout: Duration::from_millis(500),
            user_agent: "password-suite-cli/test".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn check_password_posts_body_and_decodes_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/check_password"))
            .and(body_json(serde_json::json!({ "password": "hunter2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "score": 7,
                "max_score": 8,
                "strength": "Strong",
                "requirements_met": ["length", "uppercase"],
                "requirements_failed": [],
                "leak_check": { "leaked": true, "total_exposures": 1234567 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = client_for(&server).check_password("hunter2").await.unwrap();
        assert_eq!(report.score, 7);
        assert_eq!(report.strength, "Strong");
        assert!(report.requirements_failed.is_empty());
        assert!(report.leak_check.leaked);
        assert_eq!(report.leak_check.total_exposures, 1234567);
    }

    #[tokio::test]
    async fn non_2xx_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/check_password"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client_for(&server).check_password("abc").await.is_err());
    }

    #[tokio::test]
    async fn generate_sends_length_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generate_quantum_secure_password"))
            .and(query_param("length", "32"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "password": "p" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let password = client_for(&server)
            .generate_password(GeneratorKind::Quantum, 32)
            .await
            .unwrap();
        assert_eq!(password, "p");
    }

    #[tokio::test]
    async fn slow_responses_hit_the_client_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generate_password"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "password": "late" }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate_password(GeneratorKind::Standard, 16)
            .await;
        assert!(result.is_err());
    }
}
