//! Prompt construction and reply parsing for profile enhancement

use bizkit_domain::constants::{
    MARKETING_SUGGESTIONS_TARGET_LEN, STRENGTHS_TARGET_LEN, TARGET_SEGMENTS_TARGET_LEN,
};
use bizkit_domain::{BizkitError, EnhancedProfile, Result};
use serde::Deserialize;

use super::enhancer::EnhancementRequest;

/// Build the single prompt sent to the text generator.
pub fn build_prompt(request: &EnhancementRequest<'_>) -> String {
    format!(
        "I have a business with the following information:\n\
         Name: {name}\n\
         Category: {category}\n\
         Description: {description}\n\
         Location: {location}\n\
         \n\
         Additional information provided by the business owner:\n\
         {additional}\n\
         \n\
         Based on this information, please provide:\n\
         1. A more detailed business description (2-3 paragraphs)\n\
         2. {STRENGTHS_TARGET_LEN} key strengths of this business\n\
         3. {TARGET_SEGMENTS_TARGET_LEN} potential target customer segments\n\
         4. {MARKETING_SUGGESTIONS_TARGET_LEN} marketing suggestions tailored to this business\n\
         \n\
         Respond with JSON only, using exactly this structure:\n\
         {{\n  \
           \"enhancedDescription\": \"...\",\n  \
           \"strengths\": [\"...\", \"...\", \"...\", \"...\", \"...\"],\n  \
           \"targetSegments\": [\"...\", \"...\", \"...\"],\n  \
           \"marketingSuggestions\": [\"...\", \"...\", \"...\"]\n\
         }}",
        name = request.name,
        category = request.category,
        description = request.description,
        location = request.location,
        additional = request.additional_info.unwrap_or_default(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedEnhancement {
    enhanced_description: String,
    strengths: Vec<String>,
    target_segments: Vec<String>,
    marketing_suggestions: Vec<String>,
}

/// Parse a generator reply into an [`EnhancedProfile`].
///
/// The reply must be a JSON object, optionally wrapped in a Markdown code
/// fence. Blank list entries are dropped and lists longer than their target
/// are truncated.
///
/// # Errors
/// Returns `BizkitError::Enhancement` when the reply is not valid JSON of the
/// expected shape, the description is empty, or any list ends up empty.
pub fn parse_enhancement(reply: &str) -> Result<EnhancedProfile> {
    let body = strip_code_fence(reply);
    let generated: GeneratedEnhancement = serde_json::from_str(body)
        .map_err(|e| BizkitError::Enhancement(format!("Malformed enhancement JSON: {e}")))?;

    let enhanced_description = generated.enhanced_description.trim().to_string();
    if enhanced_description.is_empty() {
        return Err(BizkitError::Enhancement("Generated description is empty".into()));
    }

    Ok(EnhancedProfile {
        enhanced_description,
        strengths: bounded_list("strengths", generated.strengths, STRENGTHS_TARGET_LEN)?,
        target_segments: bounded_list(
            "targetSegments",
            generated.target_segments,
            TARGET_SEGMENTS_TARGET_LEN,
        )?,
        marketing_suggestions: bounded_list(
            "marketingSuggestions",
            generated.marketing_suggestions,
            MARKETING_SUGGESTIONS_TARGET_LEN,
        )?,
    })
}

fn bounded_list(field: &str, items: Vec<String>, max: usize) -> Result<Vec<String>> {
    let list: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .take(max)
        .collect();

    if list.is_empty() {
        return Err(BizkitError::Enhancement(format!("Generated {field} list is empty")));
    }
    Ok(list)
}

/// Remove a surrounding ```` ``` ```` or ```` ```json ```` fence, if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}
