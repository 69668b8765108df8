//! Payment id verification.
//!
//! The lookup itself happens in a remote service reached through a
//! [`PaymentVerifier`]; [`verify_purchase`] only maps its answer (or its
//! failure) onto a [`VerificationResult`].

use crate::core::config::InstallerConfig;
use crate::error::{CourseError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    pub payment_id: String,
    pub verified: bool,
    /// Empty when unverified.
    pub download_link: String,
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn unverified<S: Into<String>>(payment_id: &str, error: S) -> Self {
        Self {
            payment_id: payment_id.to_string(),
            verified: false,
            download_link: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Body returned by the verification service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLookup {
    pub verified: bool,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub trait PaymentVerifier {
    fn lookup(&self, payment_id: &str) -> Result<PaymentLookup>;
}

pub struct HttpPaymentVerifier {
    client: Client,
    verify_url: String,
}

impl HttpPaymentVerifier {
    pub fn new(config: &InstallerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
        })
    }
}

impl PaymentVerifier for HttpPaymentVerifier {
    fn lookup(&self, payment_id: &str) -> Result<PaymentLookup> {
        tracing::debug!(url = %self.verify_url, payment_id, "looking up payment");

        let response = self
            .client
            .get(&self.verify_url)
            .query(&[("paymentId", payment_id)])
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(PaymentLookup {
                verified: false,
                download_link: None,
                error: Some("Payment not found".to_string()),
            });
        }

        if !status.is_success() {
            return Err(CourseError::VerificationError {
                url: self.verify_url.clone(),
                reason: format!("HTTP {status}"),
            });
        }

        Ok(response.json::<PaymentLookup>()?)
    }
}

/// Asks `verifier` about `payment_id`. Never fails: an unreachable service
/// or a rejected id both come back as an unverified result.
pub fn verify_purchase(verifier: &dyn PaymentVerifier, payment_id: &str) -> VerificationResult {
    match verifier.lookup(payment_id) {
        Ok(lookup) if lookup.verified => VerificationResult {
            payment_id: payment_id.to_string(),
            verified: true,
            download_link: lookup.download_link.unwrap_or_default(),
            error: None,
        },
        Ok(lookup) => {
            let error = lookup
                .error
                .unwrap_or_else(|| "Payment could not be verified".to_string());
            tracing::info!(payment_id, %error, "payment not verified");
            VerificationResult::unverified(payment_id, error)
        }
        Err(e) => {
            tracing::warn!(payment_id, error = %e, "payment lookup failed");
            VerificationResult::unverified(payment_id, e.to_string())
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use axum::http::StatusCode;

    /// Verifier that answers every lookup with a canned result.
    pub struct FakeVerifier {
        pub response: std::result::Result<PaymentLookup, String>,
    }

    impl FakeVerifier {
        pub fn verified(link: &str) -> Self {
            Self {
                response: Ok(PaymentLookup {
                    verified: true,
                    download_link: Some(link.to_string()),
                    error: None,
                }),
            }
        }

        pub fn rejected() -> Self {
            Self {
                response: Ok(PaymentLookup {
                    verified: false,
                    download_link: None,
                    error: Some("Payment not found".to_string()),
                }),
            }
        }

        pub fn unreachable() -> Self {
            Self {
                response: Err("connection refused".to_string()),
            }
        }
    }

    impl PaymentVerifier for FakeVerifier {
        fn lookup(&self, _payment_id: &str) -> Result<PaymentLookup> {
            self.response
                .clone()
                .map_err(|reason| CourseError::VerificationError {
                    url: "http://verify.test".to_string(),
                    reason,
                })
        }
    }

    #[test]
    fn test_verified_purchase_carries_link() {
        let verifier = FakeVerifier::verified("https://example.com/course.zip");
        let result = verify_purchase(&verifier, "cs_live_abc123");

        assert!(result.verified);
        assert_eq!(result.payment_id, "cs_live_abc123");
        assert_eq!(result.download_link, "https://example.com/course.zip");
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_rejected_purchase() {
        let result = verify_purchase(&FakeVerifier::rejected(), "cs_live_abc123");

        assert!(!result.verified);
        assert!(result.download_link.is_empty());
        assert_eq!(result.error.as_deref(), Some("Payment not found"));
    }

    #[test]
    fn test_unreachable_service_is_unverified() {
        let result = verify_purchase(&FakeVerifier::unreachable(), "cs_live_abc123");

        assert!(!result.verified);
        assert!(result.download_link.is_empty());
        assert!(result.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_lookup_body_uses_camel_case() {
        let lookup: PaymentLookup =
            serde_json::from_str(r#"{"verified":true,"downloadLink":"https://x/y.zip"}"#).unwrap();
        assert!(lookup.verified);
        assert_eq!(lookup.download_link.as_deref(), Some("https://x/y.zip"));
        assert_eq!(lookup.error, None);
    }

    /// Serves `status` for every request on a background thread and returns
    /// the verify url pointing at it.
    fn serve_status(status: StatusCode) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let address = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let app = axum::Router::new().fallback(move || async move { status });
                axum::serve(listener, app).await.unwrap();
            });
        });

        format!("http://{address}/verify")
    }

    fn http_verifier(verify_url: String) -> HttpPaymentVerifier {
        let config = InstallerConfig {
            verify_url,
            request_timeout_secs: 5,
            ..InstallerConfig::default()
        };
        HttpPaymentVerifier::new(&config).unwrap()
    }

    #[test]
    fn test_service_error_is_a_verification_error() {
        let url = serve_status(StatusCode::INTERNAL_SERVER_ERROR);
        let err = http_verifier(url.clone()).lookup("cs_live_abc123").unwrap_err();

        assert!(matches!(err, CourseError::VerificationError { url: ref u, .. } if u == &url));
        assert!(err.to_string().starts_with("Payment verification failed"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_not_found_is_unverified_lookup() {
        let url = serve_status(StatusCode::NOT_FOUND);
        let lookup = http_verifier(url).lookup("cs_live_abc123").unwrap();

        assert!(!lookup.verified);
        assert_eq!(lookup.download_link, None);
    }
}
