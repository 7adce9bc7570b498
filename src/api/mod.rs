//! Client side of the prediction service HTTP contract.
//!
//! - `POST /predict` — score one student
//! - `GET /statistics` — aggregate figures over all predictions
//! - `GET /predictions` — every stored prediction
//! - `GET /` — service description
//!
//! [`PredictionService`] is the seam the controller talks to; [`HttpClient`]
//! is the blocking `ureq` implementation used by the binary.

pub mod client;
pub mod types;

pub use client::HttpClient;
pub use types::{
    Contributions, OrderedCounts, OrderedMap, PredictResponse, PredictionRecord, PredictionResult,
    PredictionsResponse, ServiceInfo, StatisticsResponse, StatisticsSnapshot,
};

use crate::form::PredictionRequest;

/// Failure to obtain a usable response body.
///
/// An HTTP error status is *not* an `ApiError` when the body still decodes:
/// the service reports application errors as JSON on 4xx/5xx responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (refused, DNS, timeout, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    /// A response arrived but its body is not the expected JSON.
    #[error("unreadable response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Operations offered by the prediction service.
pub trait PredictionService {
    /// Base URL the service is reached at, for messages.
    fn base_url(&self) -> &str;

    /// `POST /predict` with the validated form payload.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError>;

    /// `GET /statistics`.
    fn statistics(&self) -> Result<StatisticsResponse, ApiError>;

    /// `GET /predictions`.
    fn predictions(&self) -> Result<PredictionsResponse, ApiError>;

    /// `GET /`.
    fn service_info(&self) -> Result<ServiceInfo, ApiError>;
}

impl<T: PredictionService + ?Sized> PredictionService for &T {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError> {
        (**self).predict(request)
    }

    fn statistics(&self) -> Result<StatisticsResponse, ApiError> {
        (**self).statistics()
    }

    fn predictions(&self) -> Result<PredictionsResponse, ApiError> {
        (**self).predictions()
    }

    fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        (**self).service_info()
    }
}
