use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::protocol::{AnalysisReport, ErrorBody};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod error;
pub mod normalize;
pub mod render;

#[cfg(test)]
mod tests;

pub use error::AnalyzeError;

/// Repeated multipart field name every document is attached under.
pub const DOCUMENT_FIELD: &str = "documents";

/// One user-chosen document: an opaque blob plus the name shown in the
/// preview. The mime type is advisory (guessed from the extension by the
/// front ends); content enforcement belongs to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
}

/// The current batch of documents, in selection order. Duplicates are kept;
/// nothing is validated here.
#[derive(Debug, Clone, Default)]
pub struct DocumentSelection {
    documents: Vec<SelectedDocument>,
}

impl DocumentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole selection. Every selection event is authoritative;
    /// there is no append path.
    pub fn replace(&mut self, documents: Vec<SelectedDocument>) {
        self.documents = documents;
    }

    pub fn documents(&self) -> &[SelectedDocument] {
        &self.documents
    }

    /// Display names in selection order, for the preview list.
    pub fn names(&self) -> Vec<String> {
        self.documents.iter().map(|doc| doc.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Lifecycle of the single outbound analysis request. Exactly one of these
/// is live per controller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Submitting,
    Succeeded(AnalysisReport),
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// Emitted on every selection replacement so the preview stays current.
    SelectionChanged { names: Vec<String> },
    SubmissionStarted,
    SubmissionSucceeded(AnalysisReport),
    SubmissionFailed { message: String },
}

/// Thin HTTP client for the fixed analysis endpoint.
pub struct AnalysisClient {
    http: Client,
    analyze_url: String,
}

impl AnalysisClient {
    /// Built without a request timeout: once a batch is posted the client
    /// waits until the call completes or the transport gives up.
    pub fn new(analyze_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            analyze_url: analyze_url.into(),
        }
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Posts one multipart batch and parses the three-way outcome: report,
    /// service rejection, or transport failure.
    pub async fn analyze(
        &self,
        documents: &[SelectedDocument],
    ) -> Result<AnalysisReport, AnalyzeError> {
        if documents.is_empty() {
            return Err(AnalyzeError::EmptySelection);
        }

        let mut form = Form::new();
        for document in documents {
            form = form.part(DOCUMENT_FIELD, document_part(document));
        }

        debug!(
            documents = documents.len(),
            url = %self.analyze_url,
            "posting analysis batch"
        );
        let response = self
            .http
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await
            .map_err(AnalyzeError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(AnalyzeError::Transport)?;

        if !status.is_success() {
            return Err(rejection_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            warn!(
                status = status.as_u16(),
                "success response did not match the report contract: {err}"
            );
            AnalyzeError::MalformedReport(err)
        })
    }
}

fn document_part(document: &SelectedDocument) -> Part {
    let part = Part::bytes(document.bytes.clone()).file_name(document.name.clone());
    match document.mime_type.as_deref() {
        // An unparseable advisory mime type is dropped rather than failing
        // the whole upload.
        Some(mime) => part.mime_str(mime).unwrap_or_else(|_| {
            Part::bytes(document.bytes.clone()).file_name(document.name.clone())
        }),
        None => part,
    }
}

fn rejection_from_body(status: StatusCode, body: &str) -> AnalyzeError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error_body) => AnalyzeError::Rejected {
            status: status.as_u16(),
            message: error_body.error,
        },
        // Parse failures while extracting the error message stay silent; the
        // caller falls back to the generic failure string.
        Err(_) => AnalyzeError::UnreadableFailure {
            status: status.as_u16(),
        },
    }
}

struct ControllerState {
    selection: DocumentSelection,
    phase: RequestState,
}

/// Owns the selection store and drives the submit lifecycle:
/// `Idle -> Submitting -> {Succeeded | Failed}`, re-entering `Submitting`
/// only from `Idle` or a terminal state. At most one request is in flight;
/// extra submit triggers are rejected here, not just by the busy overlay.
pub struct SubmissionController {
    client: AnalysisClient,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<SubmissionEvent>,
}

impl SubmissionController {
    pub fn new(client: AnalysisClient, selection: DocumentSelection) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            client,
            inner: Mutex::new(ControllerState {
                selection,
                phase: RequestState::Idle,
            }),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.events.subscribe()
    }

    /// Replaces the current selection and refreshes the preview. Allowed
    /// while a submission is in flight; the in-flight snapshot is
    /// unaffected.
    pub async fn replace_selection(&self, documents: Vec<SelectedDocument>) -> Vec<String> {
        let names = {
            let mut inner = self.inner.lock().await;
            inner.selection.replace(documents);
            inner.selection.names()
        };
        debug!(count = names.len(), "selection replaced");
        let _ = self.events.send(SubmissionEvent::SelectionChanged {
            names: names.clone(),
        });
        names
    }

    pub async fn state(&self) -> RequestState {
        self.inner.lock().await.phase.clone()
    }

    pub async fn selection_names(&self) -> Vec<String> {
        self.inner.lock().await.selection.names()
    }

    /// Drives one full submission from the selection snapshot taken at this
    /// instant, landing in a terminal state and returning the same outcome
    /// that state records. Exactly one `SubmissionStarted` and one terminal
    /// event are emitted per accepted submission.
    pub async fn submit(&self) -> Result<AnalysisReport, AnalyzeError> {
        let snapshot = {
            let mut inner = self.inner.lock().await;
            if matches!(inner.phase, RequestState::Submitting) {
                debug!("submit ignored: a submission is already in flight");
                return Err(AnalyzeError::AlreadyInFlight);
            }
            if inner.selection.is_empty() {
                // Stays in the current state: an empty submit is a local
                // prompt, never a request.
                return Err(AnalyzeError::EmptySelection);
            }
            inner.phase = RequestState::Submitting;
            inner.selection.documents().to_vec()
        };

        info!(documents = snapshot.len(), "submission started");
        let _ = self.events.send(SubmissionEvent::SubmissionStarted);

        let outcome = self.client.analyze(&snapshot).await;

        let mut inner = self.inner.lock().await;
        match &outcome {
            Ok(report) => {
                info!(
                    foir = report.foir,
                    eligible = report.eligible,
                    "submission succeeded"
                );
                inner.phase = RequestState::Succeeded(report.clone());
                let _ = self
                    .events
                    .send(SubmissionEvent::SubmissionSucceeded(report.clone()));
            }
            Err(err) => {
                let message = err.user_message();
                warn!("submission failed: {err}");
                inner.phase = RequestState::Failed {
                    message: message.clone(),
                };
                let _ = self.events.send(SubmissionEvent::SubmissionFailed { message });
            }
        }
        outcome
    }
}
