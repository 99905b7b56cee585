//! The JSON echo protocol.
//!
//! A client posts the bodies it is simulating along with its method and
//! scale. The response echoes them back under a `data` key with a
//! `"success"` status and a server timestamp. Nothing is stored.

use jiff::Timestamp;
use nbody_core::Body;
use nbody_solvers::transient::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The accepted request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationRequest {
    pub bodies: Vec<Body>,
    pub method: Method,
    pub scale: f64,
}

/// A successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub status: ResponseStatus,
    pub data: ResponseData,
}

/// The echoed request plus the time it was handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    pub bodies: Vec<Body>,
    pub method: Method,
    pub scale: f64,
    pub timestamp: Timestamp,
}

/// An error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The request body did not parse as a [`SimulationRequest`].
    #[error("invalid request body: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// The response could not be encoded.
    #[error("failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Converts this error into the body sent back to the client.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: ResponseStatus::Error,
            message: self.to_string(),
        }
    }
}

/// Builds the response for a request handled at `timestamp`.
#[must_use]
pub fn respond(request: SimulationRequest, timestamp: Timestamp) -> SimulationResponse {
    SimulationResponse {
        status: ResponseStatus::Success,
        data: ResponseData {
            bodies: request.bodies,
            method: request.method,
            scale: request.scale,
            timestamp,
        },
    }
}

/// Parses a JSON request and returns the JSON response, stamped now.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidRequest`] if the body is not a valid
/// request, or [`ProtocolError::Json`] if the response cannot be encoded.
pub fn echo(body: &str) -> Result<String, ProtocolError> {
    let request: SimulationRequest = serde_json::from_str(body).map_err(|error| {
        warn!(%error, "rejected request");
        ProtocolError::InvalidRequest(error)
    })?;
    debug!(bodies = request.bodies.len(), method = %request.method, "echoing request");

    let response = respond(request, Timestamp::now());
    Ok(serde_json::to_string(&response)?)
}
