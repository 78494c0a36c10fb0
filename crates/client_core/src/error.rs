use thiserror::Error;

/// Shown when the service fails without a usable error body, and when a
/// success response cannot be parsed.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch data from server.";
/// Shown when no response arrives at all.
pub const NETWORK_FAILURE: &str = "Network error or server unreachable";
/// Blocking prompt for a submit with nothing selected.
pub const EMPTY_SELECTION_PROMPT: &str = "Please select at least one document.";

/// Everything that can end a submission early or badly. All remote-facing
/// variants are terminal for the current submission; the user resubmits
/// manually.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Submit attempted with no documents selected; never reaches the
    /// network.
    #[error("no documents selected")]
    EmptySelection,
    /// A submission is already in flight; the extra trigger is ignored.
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    /// The service rejected the batch and said why.
    #[error("analysis rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    /// Non-success status without a parseable error body.
    #[error("analysis failed (HTTP {status}) with no parseable error body")]
    UnreadableFailure { status: u16 },
    /// Success status, but the body does not match the report contract.
    /// Displayed like an unreadable failure, kept separate for logs.
    #[error("success response did not match the report contract")]
    MalformedReport(#[source] serde_json::Error),
    /// No usable response: connect failure, DNS, reset, or an unreadable
    /// body stream.
    #[error("network error or server unreachable")]
    Transport(#[source] reqwest::Error),
}

impl AnalyzeError {
    /// The string the user actually sees. Service-provided rejection text is
    /// surfaced verbatim; everything else collapses to the fixed messages.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptySelection => EMPTY_SELECTION_PROMPT.to_string(),
            Self::AlreadyInFlight => "A submission is already in progress.".to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::UnreadableFailure { .. } | Self::MalformedReport(_) => {
                GENERIC_FETCH_FAILURE.to_string()
            }
            Self::Transport(_) => NETWORK_FAILURE.to_string(),
        }
    }
}
