use shared::protocol::{AnalysisReport, Explanation};

use crate::normalize::ExplanationView;
use crate::render::{
    eligibility_indicator, format_amount, format_foir, render_error, render_report,
};

#[test]
fn foir_always_shows_exactly_two_decimals() {
    assert_eq!(format_foir(30.0), "30.00%");
    assert_eq!(format_foir(33.333), "33.33%");
    assert_eq!(format_foir(0.0), "0.00%");
    // Not clamped to 100: the ratio can legitimately exceed it.
    assert_eq!(format_foir(104.5), "104.50%");
}

#[test]
fn amounts_are_digit_grouped_with_the_currency_prefix() {
    assert_eq!(format_amount(0.0), "₹0");
    assert_eq!(format_amount(999.0), "₹999");
    assert_eq!(format_amount(50000.0), "₹50,000");
    assert_eq!(format_amount(1234567.0), "₹1,234,567");
    assert_eq!(format_amount(50000.75), "₹50,000.75");
    assert_eq!(format_amount(1000.5), "₹1,000.50");
}

#[test]
fn eligibility_indicator_is_boolean_derived() {
    assert_eq!(eligibility_indicator(true), "✅ Yes");
    assert_eq!(eligibility_indicator(false), "❌ No");
}

#[test]
fn renders_a_full_report() {
    let report = AnalysisReport {
        status: "OK".to_string(),
        income: 50000.0,
        obligations: 15000.0,
        foir: 30.0,
        eligible: true,
        explanation: Explanation::Steps(vec!["Step A".to_string(), "Step B".to_string()]),
    };

    let view = render_report(&report);
    assert_eq!(view.status, "OK");
    assert_eq!(view.income, "₹50,000");
    assert_eq!(view.obligations, "₹15,000");
    assert_eq!(view.foir, "30.00%");
    assert!(view.eligible);
    assert_eq!(
        view.explanation,
        ExplanationView::Steps(vec!["Step A".to_string(), "Step B".to_string()])
    );
}

#[test]
fn renders_prose_explanations_as_a_paragraph() {
    let report = AnalysisReport {
        status: "success".to_string(),
        income: 73300.0,
        obligations: 22500.0,
        foir: 30.7,
        eligible: true,
        explanation: Explanation::Text("Flat review required".to_string()),
    };

    let view = render_report(&report);
    assert_eq!(
        view.explanation,
        ExplanationView::Paragraph("Flat review required".to_string())
    );
}

#[test]
fn a_failed_state_renders_as_one_verbatim_message() {
    let view = render_error("Unsupported file type");
    assert_eq!(view.message, "Unsupported file type");
}
