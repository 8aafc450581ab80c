use owo_colors::OwoColorize;
use serde_json::Value;
use std::io::IsTerminal;

use crate::models::{Model, Prediction};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Render a JSON scalar without quotes around strings
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn format_recommendations(items: &[Value]) -> Vec<String> {
    if items.is_empty() {
        return vec!["  (no recommendations)".to_string()];
    }
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            format!(
                "  {:>2}. {} | ${} | {} stars | {} match",
                idx + 1,
                format_value(&item["name"]),
                format_value(&item["price"]),
                format_value(&item["rating"]),
                format_value(&item["match"])
            )
        })
        .collect()
}

fn format_factors(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            format!(
                "    {}: {} ({} -> {})",
                format_value(&item["label"]),
                format_value(&item["description"]),
                format_value(&item["before"]),
                format_value(&item["after"])
            )
        })
        .collect()
}

/// Format a scoring result for the terminal: a header, one line per result
/// field, then the interpretation.
pub fn format_prediction(model: Model, prediction: &Prediction<Value>, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let header = format!("{} ({})", model.title(), prediction.algorithm);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    if let Value::Object(fields) = &prediction.result {
        for (key, value) in fields {
            match (key.as_str(), value) {
                ("recommendations", Value::Array(items)) => {
                    lines.push("  Recommendations:".to_string());
                    lines.extend(format_recommendations(items));
                }
                ("factors", Value::Array(items)) => {
                    lines.push("  Factors:".to_string());
                    lines.extend(format_factors(items));
                }
                _ => {
                    let rendered = format_value(value);
                    if use_colors {
                        lines.push(format!("  {}: {}", key.cyan(), rendered.yellow()));
                    } else {
                        lines.push(format!("  {}: {}", key, rendered));
                    }
                }
            }
        }
    }

    lines.push(String::new());
    lines.push(prediction.interpretation.clone());
    lines.join("\n")
}

/// One line per demo: index, slug, title, algorithm, endpoint
pub fn format_algorithm_table(use_colors: bool) -> String {
    let slug_width = Model::ALL.iter().map(|m| m.slug().len()).max().unwrap_or(0);
    let title_width = Model::ALL.iter().map(|m| m.title().len()).max().unwrap_or(0);

    Model::ALL
        .iter()
        .enumerate()
        .map(|(idx, model)| {
            let index_str = format!("{:>2}.", idx + 1);
            let slug = format!("{:<width$}", model.slug(), width = slug_width);
            let title = format!("{:<width$}", model.title(), width = title_width);
            if use_colors {
                format!(
                    "{} {}  {}  {}  {}",
                    index_str.dimmed(),
                    slug.bold(),
                    title,
                    model.algorithm().cyan(),
                    model.endpoint().underline()
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}",
                    index_str,
                    slug,
                    title,
                    model.algorithm(),
                    model.endpoint()
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
