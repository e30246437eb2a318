//! Client configuration.

use std::time::Duration;

use affect_models::VendorKind;

/// Configuration for a vendor client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Vendor API key
    pub api_key: String,
    /// Base URL of the vendor API
    pub base_url: String,
    /// Account identifier, for vendors that scope their endpoints by it
    pub client_id: String,
    /// Timeout for file uploads
    pub upload_timeout: Duration,
    /// Timeout for status and result requests
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Config with the vendor's production base URL and default timeouts.
    pub fn for_vendor(kind: VendorKind) -> Self {
        let base_url = match kind {
            VendorKind::BehavioralSignals => "https://api.behavioralsignals.com",
            VendorKind::HumeAi => "https://api.hume.ai/v0",
        };
        Self {
            api_key: String::new(),
            base_url: base_url.to_string(),
            client_id: String::new(),
            upload_timeout: Duration::from_secs(120),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Create config from environment variables.
    pub fn from_env(kind: VendorKind) -> Self {
        let mut config = Self::for_vendor(kind);

        match kind {
            VendorKind::BehavioralSignals => {
                config.api_key = std::env::var("BEHAVIORAL_SIGNALS_API_KEY").unwrap_or_default();
                config.client_id =
                    std::env::var("BEHAVIORAL_SIGNALS_CLIENT_ID").unwrap_or_default();
            }
            VendorKind::HumeAi => {
                config.api_key = std::env::var("HUME_API_KEY").unwrap_or_default();
            }
        }

        if let Ok(url) = std::env::var("AFFECT_API_BASE_URL") {
            config.base_url = url;
        }
        config.upload_timeout = Duration::from_secs(
            std::env::var("AFFECT_UPLOAD_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
        );
        config.request_timeout = Duration::from_secs(
            std::env::var("AFFECT_REQUEST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        );

        config
    }
}
