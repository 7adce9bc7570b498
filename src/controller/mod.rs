//! The client form controller.
//!
//! Three operations drive the page:
//!
//! - [`FormController::submit_prediction`] — validate the form, `POST
//!   /predict`, render the result and refresh statistics.
//! - [`FormController::render_prediction`] — replace the results container.
//! - [`FormController::refresh_statistics`] — `GET /statistics` and replace
//!   the statistics container. Also run once on page load.
//!
//! Failures are never retried. A failed submission alerts the user; a failed
//! statistics refresh only reaches the console.

use crate::api::types::{PredictResponse, PredictionResult, StatisticsSnapshot};
use crate::api::{ApiError, PredictionService};
use crate::form::{self, FieldError, FormValues};
use crate::page::{Container, Page};
use crate::render;

/// Why a submission did not produce a rendered prediction.
///
/// The `Display` text is exactly what the user is alerted with.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The form was not sent; one entry per offending field.
    #[error("Please fill all fields correctly ({})", join_fields(.0))]
    Validation(Vec<FieldError>),
    /// The service answered with `success: false`.
    #[error("Error: {message}{}", missing_suffix(.missing))]
    Application {
        message: String,
        missing: Vec<String>,
    },
    /// No usable answer came back.
    #[error(
        "Cannot connect to the prediction service at {base_url}. Make sure the backend is running."
    )]
    Transport {
        base_url: String,
        #[source]
        source: ApiError,
    },
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn missing_suffix(missing: &[String]) -> String {
    if missing.is_empty() {
        String::new()
    } else {
        format!(" (missing: {})", missing.join(", "))
    }
}

/// Message used when `success: false` arrives without an `error` string.
const UNKNOWN_ERROR: &str = "unknown error";

/// Drives one page against one prediction service.
///
/// Holds no state between calls beyond the service and page handles: the
/// same form values always produce the same request.
#[derive(Debug)]
pub struct FormController<S, P> {
    service: S,
    page: P,
}

impl<S: PredictionService, P: Page> FormController<S, P> {
    pub fn new(service: S, page: P) -> Self {
        Self { service, page }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    /// Page-load hook: fill the statistics container.
    pub fn on_load(&mut self) {
        self.refresh_statistics();
    }

    /// Validate and submit the form.
    ///
    /// On success the result is rendered and statistics are refreshed. Every
    /// failure shows exactly one alert; transport failures additionally log
    /// their cause to the console. Nothing is retried.
    pub fn submit_prediction(
        &mut self,
        values: &FormValues,
    ) -> Result<PredictionResult, SubmitError> {
        match self.request_prediction(values) {
            Ok(result) => {
                self.render_prediction(&result);
                self.refresh_statistics();
                Ok(result)
            }
            Err(err) => {
                if let SubmitError::Transport { source, .. } = &err {
                    self.page.console_error(&source.to_string());
                }
                self.page.alert(&err.to_string());
                Err(err)
            }
        }
    }

    /// Validation plus the `/predict` round trip, without touching the page.
    fn request_prediction(&self, values: &FormValues) -> Result<PredictionResult, SubmitError> {
        let request = form::validate(values).map_err(SubmitError::Validation)?;

        let response = self
            .service
            .predict(&request)
            .map_err(|source| self.transport_error(source))?;

        self.interpret(response)
    }

    fn interpret(&self, response: PredictResponse) -> Result<PredictionResult, SubmitError> {
        if !response.success {
            return Err(SubmitError::Application {
                message: response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
                missing: response.missing,
            });
        }

        response.prediction.ok_or_else(|| {
            self.transport_error(ApiError::Decode {
                url: format!("{}/predict", self.service.base_url()),
                message: "successful response without a prediction".to_string(),
            })
        })
    }

    fn transport_error(&self, source: ApiError) -> SubmitError {
        SubmitError::Transport {
            base_url: self.service.base_url().to_string(),
            source,
        }
    }

    /// Replace the results container with a rendered prediction.
    pub fn render_prediction(&mut self, result: &PredictionResult) {
        let html = render::prediction_view(result).render();
        self.page.replace_contents(Container::Results, html);
    }

    /// Fetch statistics and replace the statistics container.
    ///
    /// Returns the snapshot that was rendered. Failures are logged to the
    /// console and leave the container as it was.
    pub fn refresh_statistics(&mut self) -> Option<StatisticsSnapshot> {
        let outcome = match self.service.statistics() {
            Ok(response) if response.success => response
                .statistics
                .ok_or_else(|| "successful response without statistics".to_string()),
            Ok(response) => Err(response
                .error
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(stats) => {
                let html = render::statistics_view(&stats).render();
                self.page.replace_contents(Container::Statistics, html);
                Some(stats)
            }
            Err(message) => {
                self.page
                    .console_error(&format!("Error loading statistics: {message}"));
                None
            }
        }
    }
}
