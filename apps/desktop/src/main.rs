use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    normalize::ExplanationView,
    render::{eligibility_indicator, render_report},
    AnalysisClient, DocumentSelection, SelectedDocument, SubmissionController,
};

/// Submit a batch of documents to the FOIR analysis service and print the
/// eligibility report.
#[derive(Parser, Debug)]
struct Args {
    /// Analysis endpoint the documents are posted to.
    #[arg(long, default_value = "http://127.0.0.1:8001/analyze")]
    analyze_url: String,
    /// Documents to submit (the service expects pdf/png/jpg/jpeg).
    #[arg(required = true)]
    documents: Vec<PathBuf>,
}

fn load_documents(paths: &[PathBuf]) -> Result<Vec<SelectedDocument>> {
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

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let documents = load_documents(&args.documents)?;
    let controller = SubmissionController::new(
        AnalysisClient::new(args.analyze_url),
        DocumentSelection::new(),
    );

    let names = controller.replace_selection(documents).await;
    println!("Submitting {} document(s):", names.len());
    for name in &names {
        println!("  - {name}");
    }

    let report = match controller.submit().await {
        Ok(report) => report,
        Err(err) => bail!("{}", err.user_message()),
    };

    let view = render_report(&report);
    println!();
    println!("Status:      {}", view.status);
    println!("Income:      {}", view.income);
    println!("Obligations: {}", view.obligations);
    println!("FOIR:        {}", view.foir);
    println!("Eligible:    {}", eligibility_indicator(view.eligible));
    println!("Explanation:");
    match &view.explanation {
        ExplanationView::Steps(steps) => {
            for (index, step) in steps.iter().enumerate() {
                println!("  {}. {}", index + 1, step);
            }
        }
        ExplanationView::Paragraph(text) => println!("  {text}"),
    }

    Ok(())
}
