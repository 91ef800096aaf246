//! HTML page and plain-text report rendering

use crate::form::{form_fields, params_of, Column, Control, FormField};
use loanwise_core::verdict::PREDICTION_ERROR_HINT;
use loanwise_core::{ApplicantRecord, Assessment, Error, ModelInfo, Verdict};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Personal Loan Eligibility Predictor";

/// What to show below the form
#[derive(Debug)]
pub enum Outcome<'a> {
    Assessment(&'a Assessment),
    Error(&'a Error),
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page: form pre-filled with `record`, then the outcome if any
pub fn render_page(model: &ModelInfo, record: &ApplicantRecord, outcome: Option<Outcome<'_>>) -> String {
    let params = params_of(record);
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main class="page">
    <div class="banner success">Bank loan prediction model loaded successfully! <span class="muted">({name} v{version})</span></div>
    <h1>&#127974; {title}</h1>
    <p>Enter your details to find out your personal loan eligibility.</p>
    <h2>Your Financial and Personal Details</h2>
    <form method="post" action="/check">
        <div class="columns">
"#,
        title = PAGE_TITLE,
        name = escape_html(&model.name),
        version = escape_html(&model.version),
    );

    for column in [Column::Left, Column::Right] {
        html.push_str("            <div class=\"column\">\n");
        for spec in form_fields().iter().filter(|f| f.column == column) {
            let current = params.get(spec.name).map(String::as_str).unwrap_or("");
            render_control(&mut html, spec, current);
        }
        html.push_str("            </div>\n");
    }

    html.push_str(
        r#"        </div>
        <button type="submit">Check Eligibility</button>
    </form>
"#,
    );

    if let Some(outcome) = outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_control(html: &mut String, spec: &FormField, current: &str) {
    let label = escape_html(spec.label);
    match &spec.control {
        Control::Number {
            min, max, integer, ..
        } => {
            // The browser treats `step` as a validity constraint, so any
            // in-range value must stay a step match
            let step = if *integer { "1" } else { "any" };
            let _ = write!(
                html,
                r#"                <label>{label}
                    <input type="number" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required>
                </label>
"#,
                name = spec.name,
                value = escape_html(current),
            );
        }
        Control::Select { options, .. } => {
            let _ = write!(
                html,
                "                <label>{label}\n                    <select name=\"{}\">\n",
                spec.name
            );
            for option in options {
                let selected = if current == option.value.to_string() {
                    " selected"
                } else {
                    ""
                };
                let _ = writeln!(
                    html,
                    "                        <option value=\"{}\"{}>{}</option>",
                    option.value,
                    selected,
                    escape_html(option.label)
                );
            }
            html.push_str("                    </select>\n                </label>\n");
        }
        Control::YesNo { .. } => {
            let _ = write!(
                html,
                "                <fieldset>\n                    <legend>{label}</legend>\n"
            );
            for (value, text) in [("1", "Yes"), ("0", "No")] {
                let checked = if current == value { " checked" } else { "" };
                let _ = writeln!(
                    html,
                    "                    <label class=\"inline\"><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>",
                    spec.name, value, checked, text
                );
            }
            html.push_str("                </fieldset>\n");
        }
    }
}

fn render_outcome(html: &mut String, outcome: Outcome<'_>) {
    html.push_str("    <section class=\"result\">\n");
    match outcome {
        Outcome::Assessment(assessment) => {
            html.push_str("        <h2>Prediction Result:</h2>\n");
            let class = match assessment.verdict {
                Verdict::Eligible => "success",
                Verdict::NotEligible => "error",
            };
            let mark = match assessment.verdict {
                Verdict::Eligible => "&#9989;",
                Verdict::NotEligible => "&#10060;",
            };
            let _ = writeln!(
                html,
                "        <div class=\"banner {}\">{} {}</div>",
                class,
                mark,
                escape_html(&assessment.message)
            );

            if assessment.verdict == Verdict::NotEligible {
                html.push_str("        <hr>\n        <h2>Potential Reasons for Rejection:</h2>\n");
                for reason in &assessment.reasons {
                    let _ = writeln!(
                        html,
                        "        <div class=\"banner warning\">- {}</div>",
                        escape_html(reason)
                    );
                }
            }
            if let Some(note) = &assessment.note {
                let _ = writeln!(html, "        <div class=\"banner info\">{}</div>", escape_html(note));
            }
        }
        Outcome::Error(error) => {
            let _ = writeln!(
                html,
                "        <div class=\"banner error\">An error occurred during prediction: {}</div>",
                escape_html(&error_message(error))
            );
            let _ = writeln!(
                html,
                "        <div class=\"banner warning\">{}</div>",
                PREDICTION_ERROR_HINT
            );
        }
    }
    html.push_str("    </section>\n");
}

/// Error text without the variant prefix the display form carries
fn error_message(error: &Error) -> String {
    match error {
        Error::Prediction(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Plain-text rendering of an assessment, for the terminal
pub fn text_report(assessment: &Assessment) -> String {
    let mut out = String::new();
    let verdict = match assessment.verdict {
        Verdict::Eligible => "Eligible",
        Verdict::NotEligible => "Not Eligible",
    };
    let _ = writeln!(out, "Prediction Result: {}", verdict);
    let _ = writeln!(out, "  {}", assessment.message);

    if assessment.verdict == Verdict::NotEligible {
        let _ = writeln!(out);
        if !assessment.reasons.is_empty() {
            let _ = writeln!(out, "Potential Reasons for Rejection:");
            for reason in &assessment.reasons {
                let _ = writeln!(out, "  - {}", reason);
            }
            let _ = writeln!(out);
        }
    }
    if let Some(note) = &assessment.note {
        let _ = writeln!(out, "{}", note);
    }
    out
}
