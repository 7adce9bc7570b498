/// Blocking HTTP client for the prediction service.
///
/// Uses the synchronous `ureq` client. One agent is built per client and
/// reused for every call the client makes. No call is ever retried.
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{PredictResponse, PredictionsResponse, ServiceInfo, StatisticsResponse};
use super::{ApiError, PredictionService};
use crate::config::schema::ApiConfig;
use crate::form::PredictionRequest;

/// Synchronous prediction service client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout: Option<Duration>,
    agent: ureq::Agent,
}

impl HttpClient {
    /// Build a client from the resolved `[api]` config.
    ///
    /// A `timeout_ms` of zero leaves requests without a deadline.
    pub fn from_config(config: &ApiConfig) -> Self {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));

        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            agent: builder.build(),
        }
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        let url = format!("{}{}", self.base_url, path);
        // "localhost" may resolve to ::1 first while the service only binds IPv4
        if let Ok(mut parsed) = Url::parse(&url)
            && parsed.host_str() == Some("localhost")
            && parsed.set_host(Some("127.0.0.1")).is_ok()
        {
            return parsed.into();
        }
        url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let result = self.agent.get(&url).call();
        read_json(&url, result)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let result = self.agent.post(&url).send_json(body);
        read_json(&url, result)
    }
}

/// Decode the JSON body of a response, whatever its status code.
fn read_json<T: DeserializeOwned>(
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let response = match result {
        Ok(response) => response,
        // Error statuses still carry the service's JSON error body
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => {
            return Err(ApiError::Transport {
                url: url.to_string(),
                message: transport.to_string(),
            });
        }
    };

    let status = response.status();
    response
        .into_json::<T>()
        .map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: format!("HTTP {status}: {e}"),
        })
}

impl PredictionService for HttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError> {
        self.post_json("/predict", request)
    }

    fn statistics(&self) -> Result<StatisticsResponse, ApiError> {
        self.get_json("/statistics")
    }

    fn predictions(&self) -> Result<PredictionsResponse, ApiError> {
        self.get_json("/predictions")
    }

    fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        self.get_json("/")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
