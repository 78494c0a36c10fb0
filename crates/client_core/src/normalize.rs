//! Turns the service's heterogeneous explanation field into one renderable
//! directive: a numbered list of steps or a single paragraph.

use shared::protocol::Explanation;

/// Legacy delimiter the service uses to separate steps inside one string.
pub const STEP_MARKER: char = '*';

/// Rendering directive produced exactly once per report; downstream code
/// never re-inspects the raw explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationView {
    /// Render as a numbered list, one entry per step.
    Steps(Vec<String>),
    /// Render as one paragraph, content verbatim.
    Paragraph(String),
}

/// Pure: identical input always yields the identical directive.
///
/// Pre-structured step lists pass through verbatim. A string containing the
/// marker is split on every occurrence, fragments trimmed and empties
/// dropped (a marker-and-whitespace-only string legitimately yields zero
/// steps). Any other string, including the empty one, is a paragraph.
pub fn normalize_explanation(explanation: &Explanation) -> ExplanationView {
    match explanation {
        Explanation::Steps(steps) => ExplanationView::Steps(steps.clone()),
        Explanation::Text(text) if text.contains(STEP_MARKER) => ExplanationView::Steps(
            text.split(STEP_MARKER)
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_owned)
                .collect(),
        ),
        Explanation::Text(text) => ExplanationView::Paragraph(text.clone()),
    }
}
