//! App shell: selection drop area, filename preview, submit action, the
//! full-viewport busy overlay, and the result/error panel.

use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender};

use client_core::normalize::ExplanationView;
use client_core::render::{eligibility_indicator, ResultView};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// Text inside the full-viewport overlay while a submission runs.
const BUSY_TEXT: &str = "Calculating FOIR, please wait...";
/// Extension hint for the picker. Advisory only: dropped files of any type
/// are accepted and content enforcement stays with the remote service.
const DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];
const IDLE_STATUS: &str = "Select documents to analyse";

const HIGHLIGHT_GREEN: egui::Color32 = egui::Color32::from_rgb(40, 167, 69);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(217, 83, 79);

pub struct AnalyserApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    preview: Vec<String>,
    busy: bool,
    result: Option<ResultView>,
    error: Option<String>,
    selection_prompt: Option<String>,
    status: String,
}

impl AnalyserApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            preview: Vec::new(),
            busy: false,
            result: None,
            error: None,
            selection_prompt: None,
            status: IDLE_STATUS.to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::SelectionPreview(names) => {
                    self.status = if names.is_empty() {
                        IDLE_STATUS.to_string()
                    } else {
                        format!("{} document(s) ready", names.len())
                    };
                    self.preview = names;
                }
                UiEvent::SelectionRejected(prompt) => self.selection_prompt = Some(prompt),
                UiEvent::AnalysisStarted => {
                    // Entering Submitting hides any prior outcome before the
                    // overlay goes up.
                    self.busy = true;
                    self.result = None;
                    self.error = None;
                    self.status = "Analysing...".to_string();
                }
                UiEvent::AnalysisCompleted(view) => {
                    self.busy = false;
                    self.result = Some(view);
                    self.status = "Analysis complete".to_string();
                }
                UiEvent::AnalysisFailed(message) => {
                    self.busy = false;
                    self.error = Some(message);
                    self.status = "Analysis failed".to_string();
                }
                UiEvent::Error(err) => {
                    self.status = format!("{}: {}", err_label(err.context()), err.message());
                }
            }
        }
    }

    fn replace_selection(&mut self, paths: Vec<PathBuf>) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::ReplaceSelection { paths },
            &mut self.status,
        );
    }

    fn show_drop_area(&mut self, ui: &mut egui::Ui, hovering_files: bool) {
        let label = if hovering_files {
            "Release to replace the current selection".to_string()
        } else {
            "Drag & drop your documents here\nor click to select files (pdf, png, jpg, jpeg)"
                .to_string()
        };
        let response = ui.add_sized(
            [ui.available_width(), 110.0],
            egui::Button::new(egui::RichText::new(label).size(15.0)),
        );
        if response.clicked() {
            let dialog = rfd::FileDialog::new().add_filter("Documents", &DOCUMENT_EXTENSIONS);
            if let Some(paths) = dialog.pick_files() {
                self.replace_selection(paths);
            }
        }
    }

    fn show_preview(&self, ui: &mut egui::Ui) {
        if self.preview.is_empty() {
            return;
        }
        ui.add_space(8.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Selected documents").strong());
            for (index, name) in self.preview.iter().enumerate() {
                ui.label(format!("{}. {}", index + 1, name));
            }
        });
    }

    fn show_outcome(&self, ui: &mut egui::Ui) {
        if let Some(message) = &self.error {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(format!("Error: {message}"))
                        .color(ERROR_RED)
                        .strong(),
                );
            });
        } else if let Some(view) = &self.result {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                result_row(ui, "Status", &view.status, false);
                result_row(ui, "Income", &view.income, true);
                result_row(ui, "Obligations", &view.obligations, true);
                result_row(ui, "FOIR", &view.foir, true);
                result_row(ui, "Eligible", eligibility_indicator(view.eligible), false);
                ui.add_space(4.0);
                ui.label(egui::RichText::new("Explanation").strong());
                match &view.explanation {
                    ExplanationView::Steps(steps) => {
                        for (index, step) in steps.iter().enumerate() {
                            ui.label(format!("{}. {}", index + 1, step));
                        }
                    }
                    ExplanationView::Paragraph(text) => {
                        ui.label(text);
                    }
                }
            });
        }
    }

    fn show_selection_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.selection_prompt.clone() else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new("Nothing selected")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(prompt);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });
        if acknowledged {
            self.selection_prompt = None;
        }
    }

    /// Full-viewport dim + spinner. Interaction with the page underneath is
    /// blocked both here (the overlay swallows input) and by the
    /// `add_enabled_ui` gate on the main panel.
    fn show_busy_overlay(&self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("busy_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let _blocker = ui.allocate_rect(screen, egui::Sense::click_and_drag());
                ui.painter().rect_filled(
                    screen,
                    egui::CornerRadius::ZERO,
                    egui::Color32::from_black_alpha(140),
                );
            });
        egui::Area::new(egui::Id::new("busy_overlay_status"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(48.0));
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(BUSY_TEXT)
                            .size(18.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                });
            });
    }
}

fn result_row(ui: &mut egui::Ui, label: &str, value: &str, highlight: bool) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        if highlight {
            ui.label(egui::RichText::new(value).color(HIGHLIGHT_GREEN).strong());
        } else {
            ui.label(value);
        }
    });
}

impl eframe::App for AnalyserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let hovering_files = ctx.input(|input| !input.raw.hovered_files.is_empty());
        let dropped: Vec<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() && !self.busy {
            self.replace_selection(dropped);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!self.busy, |ui| {
                ui.vertical_centered(|ui| ui.heading("FOIR Analyser"));
                ui.add_space(10.0);
                self.show_drop_area(ui, hovering_files);
                self.show_preview(ui);
                ui.add_space(10.0);
                let analyze =
                    ui.add_sized([ui.available_width(), 36.0], egui::Button::new("Analyze"));
                if analyze.clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Analyze,
                        &mut self.status,
                    );
                }
                ui.add_space(12.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_outcome(ui);
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        self.show_selection_prompt(ctx);

        if self.busy {
            self.show_busy_overlay(ctx);
            // Keep the spinner animating while the request is outstanding.
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
