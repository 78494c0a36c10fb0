use serde::{Deserialize, Serialize};

/// Successful analysis payload returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: String,
    pub income: f64,
    pub obligations: f64,
    pub foir: f64,
    pub eligible: bool,
    pub explanation: Explanation,
}

/// The service sends the explanation either as a pre-structured list of
/// steps or as a single string (possibly `*`-delimited legacy prose). The
/// ambiguity is resolved once, by the client's normalizer, and never
/// re-inspected after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Explanation {
    Steps(Vec<String>),
    Text(String),
}

/// Failure payload for non-success responses. The `error` field is all the
/// service ever sends; a body that does not match this shape falls back to a
/// generic client-side message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
