//! UI/backend events and error modeling for the analyser GUI controller.

use client_core::render::ResultView;

pub enum UiEvent {
    Info(String),
    /// Current selection names, in order; refreshed on every replacement.
    SelectionPreview(Vec<String>),
    /// Submit attempted with nothing selected; shown as a blocking prompt.
    SelectionRejected(String),
    AnalysisStarted,
    AnalysisCompleted(ResultView),
    AnalysisFailed(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadDocument,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::BackendStartup => "Startup",
        UiErrorContext::LoadDocument => "Documents",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_every_error_context() {
        assert_eq!(err_label(UiErrorContext::BackendStartup), "Startup");
        assert_eq!(err_label(UiErrorContext::LoadDocument), "Documents");
    }

    #[test]
    fn error_keeps_context_and_message() {
        let err = UiError::from_message(UiErrorContext::LoadDocument, "could not read file");
        assert_eq!(err.context(), UiErrorContext::LoadDocument);
        assert_eq!(err.message(), "could not read file");
    }
}
