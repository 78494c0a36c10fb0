//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

pub enum BackendCommand {
    /// Replace the whole document selection with these paths. Selection
    /// events are authoritative; there is no append command.
    ReplaceSelection { paths: Vec<PathBuf> },
    /// Submit the current selection to the analysis service.
    Analyze,
}
