//! Post body assembly.
//!
//! Builds the HTML body from the post fields in a fixed order:
//!
//! 1. Content text in a `<div>`
//! 2. Metadata paragraph
//! 3. Positive / negative prompt sections
//! 4. Sampler settings table
//! 5. The uploaded image
//!
//! User text is inserted verbatim. Nothing is HTML-escaped: the input comes
//! from the operator running the pipeline, and metadata may carry markup.

use std::fmt::Write;

use crate::params::SamplingParams;
use crate::types::MediaAsset;

/// Inputs for [`assemble`].
#[derive(Debug, Clone, Copy)]
pub struct PostContent<'a> {
    /// Post title. Sent as the post's title field only; not rendered into the body.
    pub title: &'a str,
    /// Main text.
    pub body: &'a str,
    /// Free-form generation metadata.
    pub metadata: &'a str,
    /// Positive prompt.
    pub positive_prompt: &'a str,
    /// Negative prompt.
    pub negative_prompt: &'a str,
    /// Sampler settings.
    pub params: &'a SamplingParams,
    /// Uploaded image.
    pub media: &'a MediaAsset,
    /// Whether to append the image after the text.
    pub embed_image: bool,
}

/// Render the post body.
pub fn assemble(content: &PostContent<'_>) -> String {
    let mut html = format!("<div>{}</div>", content.body);

    if !content.metadata.is_empty() {
        let _ = write!(
            html,
            "<p style=\"direction: ltr;\">Meta information: {}</p>",
            content.metadata
        );
    }

    if !content.positive_prompt.is_empty() {
        let _ = write!(
            html,
            "<h4 style=\"direction: ltr;\">🟢 Positive Prompt:</h4><p>{}</p>",
            content.positive_prompt
        );
    }
    if !content.negative_prompt.is_empty() {
        let _ = write!(
            html,
            "<h4 style=\"direction: ltr;\">🔴 Negative Prompt:</h4><p>{}</p>",
            content.negative_prompt
        );
    }

    if let Some(table) = settings_table(content.params) {
        html.push_str("<div style=\"direction: ltr;\"> <h4>KSampler Settings Table:</h4>\n");
        html.push_str(&table);
        html.push_str("</div>");
    }

    if content.embed_image {
        let _ = write!(
            html,
            "<hr><img src='{}' style='max-width:100%;'>",
            content.media.url
        );
    }

    html
}

/// Parameter/value table, or `None` when no parameter has a value.
fn settings_table(params: &SamplingParams) -> Option<String> {
    let rows = params.rows();
    if rows.is_empty() {
        return None;
    }

    let mut html = String::from(
        "<table border='1' style='border-collapse:collapse;direction: ltr;'>\
         <tr><th>Parameter</th><th>Value</th></tr>",
    );
    for (label, value) in rows {
        let _ = write!(html, "<tr><td>{label}</td><td>{value}</td></tr>");
    }
    html.push_str("</table>");
    Some(html)
}
