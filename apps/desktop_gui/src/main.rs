use std::{path::PathBuf, sync::Arc, thread};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Context as _;
use client_core::{
    error::EMPTY_SELECTION_PROMPT, render::render_report, AnalysisClient, AnalyzeError,
    DocumentSelection, SelectedDocument, SubmissionController, SubmissionEvent,
};
use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::{UiError, UiErrorContext, UiEvent};
use ui::AnalyserApp;

fn load_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<SelectedDocument>> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("could not read document '{}'", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let mime_type = mime_guess::from_path(path)
                .first()
                .map(|mime| mime.to_string());
            Ok(SelectedDocument {
                name,
                bytes,
                mime_type,
            })
        })
        .collect()
}

fn spawn_backend_thread(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let settings = config::load_settings();
            tracing::info!(analyze_url = %settings.analyze_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            let controller = Arc::new(SubmissionController::new(
                AnalysisClient::new(settings.analyze_url),
                DocumentSelection::new(),
            ));

            // Forward controller lifecycle events to the UI thread.
            let mut events = controller.subscribe_events();
            let event_ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let forwarded = match event {
                        SubmissionEvent::SelectionChanged { names } => {
                            UiEvent::SelectionPreview(names)
                        }
                        SubmissionEvent::SubmissionStarted => UiEvent::AnalysisStarted,
                        SubmissionEvent::SubmissionSucceeded(report) => {
                            UiEvent::AnalysisCompleted(render_report(&report))
                        }
                        SubmissionEvent::SubmissionFailed { message } => {
                            UiEvent::AnalysisFailed(message)
                        }
                    };
                    let _ = event_ui_tx.try_send(forwarded);
                }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::ReplaceSelection { paths } => {
                        match load_documents(&paths) {
                            Ok(documents) => {
                                controller.replace_selection(documents).await;
                            }
                            Err(err) => {
                                // The previous selection stays authoritative
                                // when a replacement batch cannot be fully
                                // read.
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::LoadDocument,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::Analyze => match controller.submit().await {
                        Ok(_) => {}
                        Err(AnalyzeError::EmptySelection) => {
                            let _ = ui_tx.try_send(UiEvent::SelectionRejected(
                                EMPTY_SELECTION_PROMPT.to_string(),
                            ));
                        }
                        Err(AnalyzeError::AlreadyInFlight) => {
                            tracing::debug!(
                                "analyze command ignored while a submission is in flight"
                            );
                        }
                        // Remote failures already reached the UI through the
                        // event stream.
                        Err(err) => tracing::warn!("submission failed: {err}"),
                    },
                }
            }
        });
    });
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    spawn_backend_thread(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FOIR Analyser")
            .with_inner_size([700.0, 780.0])
            .with_min_inner_size([520.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "FOIR Analyser",
        options,
        Box::new(|_cc| Ok(Box::new(AnalyserApp::new(cmd_tx, ui_rx)))),
    )
}
