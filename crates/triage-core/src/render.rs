//! Reply markup.
//!
//! Replies are newline-joined sections with light HTML markup the chat client
//! styles. Rendering never decides anything; it only lays out results.

use crate::config::{CannedResponse, RenderOptions};
use crate::models::Diagnosis;

/// Bullet each item on its own line.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Diagnosis sections in display order. The duration warning, when present,
/// is always the fourth line.
pub fn diagnosis_markup(diagnosis: &Diagnosis, options: &RenderOptions) -> String {
    let color = diagnosis.severity.color();
    let best = &diagnosis.best_match;

    let mut sections = vec![
        format!(
            "<div class='diagnosis-header'>Based on your symptoms ({}), you may have:</div>",
            diagnosis.symptoms.sorted_display().join(", ")
        ),
        format!(
            "<div class='disease-name' style='border-left: 4px solid {}'>{}</div>",
            color, best.disease
        ),
        format!(
            "<div class='severity-message' style='color: {}'>{}</div>",
            color,
            diagnosis.severity.message()
        ),
        "<div class='section-header'>Recommended treatments:</div>".to_string(),
        format!("<ul class='treatment-list'>{}</ul>", bullet_list(&best.treatment)),
        "<div class='section-header'>Advice:</div>".to_string(),
        format!("<div class='advice-text'>{}</div>", best.advice),
    ];

    if let Some(warning) = diagnosis.duration.warning() {
        sections.insert(3, format!("<div class='duration-warning'>{}</div>", warning));
    }

    if options.include_related && !diagnosis.related.is_empty() {
        sections.push(format!(
            "<div class='related-conditions'>Related conditions: {}</div>",
            diagnosis.related.join(", ")
        ));
    }

    sections.join("\n")
}

/// Canned multi-step answer for a single keyword.
pub fn canned_markup(canned: &CannedResponse) -> String {
    [
        format!("For {}, I recommend:", canned.keyword),
        bullet_list(&canned.steps),
        "\nAdditional advice:".to_string(),
        canned.advice.clone(),
    ]
    .join("\n")
}

/// Substitute the caller's name into a reply template.
pub fn personalize(template: &str, username: &str) -> String {
    template.replace("{username}", username)
}
