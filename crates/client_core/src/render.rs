//! Presentation-only mapping from analysis outcomes to display models.
//! Nothing here touches the request state.

use shared::protocol::AnalysisReport;

use crate::normalize::{normalize_explanation, ExplanationView};

/// Currency glyph the service's figures are denominated in. Formatting
/// only; no conversion happens client-side.
const CURRENCY_PREFIX: &str = "₹";

/// Display model for a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub status: String,
    pub income: String,
    pub obligations: String,
    pub foir: String,
    pub eligible: bool,
    pub explanation: ExplanationView,
}

/// Display model for a failed submission: one message, already user-facing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
}

pub fn render_report(report: &AnalysisReport) -> ResultView {
    ResultView {
        status: report.status.clone(),
        income: format_amount(report.income),
        obligations: format_amount(report.obligations),
        foir: format_foir(report.foir),
        eligible: report.eligible,
        explanation: normalize_explanation(&report.explanation),
    }
}

pub fn render_error(message: impl Into<String>) -> ErrorView {
    ErrorView {
        message: message.into(),
    }
}

pub fn eligibility_indicator(eligible: bool) -> &'static str {
    if eligible {
        "✅ Yes"
    } else {
        "❌ No"
    }
}

/// FOIR is a percentage shown to exactly two decimal places.
pub fn format_foir(foir: f64) -> String {
    format!("{foir:.2}%")
}

/// Digit-grouped magnitude with the currency prefix: `₹50,000`,
/// `₹1,234,567`, `₹50,000.75`. Two fractional digits, shown only when the
/// value is not integral.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let mut grouped = group_thousands(cents / 100);
    let fraction = cents % 100;
    if fraction != 0 {
        grouped.push('.');
        grouped.push_str(&format!("{fraction:02}"));
    }
    if negative {
        format!("-{CURRENCY_PREFIX}{grouped}")
    } else {
        format!("{CURRENCY_PREFIX}{grouped}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
