// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render an orchestrator's plan envelope into display fragments.
//!
//! The envelope comes from free-form model output, so nothing about its
//! shape is trusted: missing sections render as placeholders and only
//! output that is not a JSON object at all is an error.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// `[title](url)` at the start of a string.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]\((.*?)\)").expect("valid link pattern"));

const VIDEO_LINK_COLUMN: &str = "Video Link";

/// Known workout columns, in display order. Other keys follow these.
const WORKOUT_COLUMNS: [&str; 4] = ["Day", "Workout Type", "Example Exercises", VIDEO_LINK_COLUMN];

/// Display fragments for a generated plan.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RenderedPlan {
    /// Calorie and macro summary (markdown)
    pub diet_markdown: String,
    /// Weekly meal plan rows
    pub meal_plan: Vec<MealRow>,
    /// Workout schedule table (HTML)
    pub workout_html: String,
    /// Quote block (markdown)
    pub quote_markdown: String,
    /// Fact line (markdown)
    pub fact_markdown: String,
    /// The parsed envelope
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealRow {
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Error formatting plan: {0}")]
    InvalidJson(String),

    #[error("Error formatting plan: expected a JSON object")]
    NotAnObject,
}

/// Parse raw orchestrator output and render it.
pub fn render_plan(raw: &str) -> Result<RenderedPlan, RenderError> {
    let data: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| RenderError::InvalidJson(e.to_string()))?;
    let envelope = data.as_object().ok_or(RenderError::NotAnObject)?;

    let empty = Map::new();
    let diet = object_field(envelope, "diet_plan").unwrap_or(&empty);
    let motivation = object_field(envelope, "motivational_content").unwrap_or(&empty);

    let rendered = RenderedPlan {
        diet_markdown: render_diet(diet),
        meal_plan: meal_rows(diet),
        workout_html: render_workout(envelope.get("workout_plan")),
        quote_markdown: render_quote(motivation),
        fact_markdown: format!(
            "💡 **Did you know?** {}",
            text_or(motivation.get("fact"), "...")
        ),
        data,
    };
    Ok(rendered)
}

/// Models often wrap JSON in a markdown code fence; accept both forms.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Convert a leading markdown link to an HTML anchor opening in a new tab.
/// Anything else is returned escaped and unchanged.
pub fn markdown_to_html_link(text: &str) -> String {
    match MARKDOWN_LINK.captures(text) {
        Some(caps) => format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_html(&caps[2]),
            escape_html(&caps[1])
        ),
        None => escape_html(text),
    }
}

fn render_diet(diet: &Map<String, Value>) -> String {
    let empty = Map::new();
    let macros = object_field(diet, "macros").unwrap_or(&empty);

    format!(
        "### 🥗 Your Nutrition Plan\n\
         **Daily Calorie Target:** `{} kcal`\n\
         **Macronutrients:**\n\
         - **Protein:** `{}g`\n\
         - **Carbs:** `{}g`\n\
         - **Fat:** `{}g`\n",
        text_or(diet.get("daily_calories"), "N/A"),
        text_or(macros.get("protein_g"), "N/A"),
        text_or(macros.get("carbs_g"), "N/A"),
        text_or(macros.get("fat_g"), "N/A"),
    )
}

fn meal_rows(diet: &Map<String, Value>) -> Vec<MealRow> {
    diet.get("weekly_meal_plan")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_object)
                .map(|row| MealRow {
                    day: text_or(row.get("Day"), ""),
                    breakfast: text_or(row.get("Breakfast"), ""),
                    lunch: text_or(row.get("Lunch"), ""),
                    dinner: text_or(row.get("Dinner"), ""),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn render_workout(workout: Option<&Value>) -> String {
    let mut html = String::from("<h3>🏋️ Your Workout Plan</h3>");

    let rows: Vec<&Map<String, Value>> = workout
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default();

    if rows.is_empty() {
        html.push_str("<p>No workout plan generated.</p>");
        return html;
    }

    let mut columns: Vec<&str> = WORKOUT_COLUMNS
        .into_iter()
        .filter(|column| rows.iter().any(|row| row.contains_key(*column)))
        .collect();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    html.push_str("<table><thead><tr>");
    for column in &columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead><tbody>");

    for row in &rows {
        html.push_str("<tr>");
        for column in &columns {
            let cell = text_or(row.get(*column), "");
            let cell = if *column == VIDEO_LINK_COLUMN {
                markdown_to_html_link(&cell)
            } else {
                escape_html(&cell)
            };
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn render_quote(motivation: &Map<String, Value>) -> String {
    let empty = Map::new();
    let quote = object_field(motivation, "quote").unwrap_or(&empty);

    format!(
        "## 🔥 Motivation Zone\n> \"{}\"\n> — *{}*",
        text_or(quote.get("quote"), "..."),
        text_or(quote.get("author"), "Unknown"),
    )
}

fn object_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Display text for a JSON value; `default` when absent or null.
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
