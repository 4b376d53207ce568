//! Raw profile input and its validation
//!
//! [`ProfileFields`] is the allow-listed set of fields a caller may submit.
//! Anything else in the request body is ignored, so callers can never
//! overwrite `id`, `ownerId` or the timestamps. Empty or whitespace-only
//! strings count as absent.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{MAX_LONG_FIELD_LENGTH, MAX_SHORT_FIELD_LENGTH};
use crate::types::business::{BusinessCategory, BusinessDetails, SocialMedia};
use crate::{BizkitError, Result};

/// Integer field as submitted by a form: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Caller-submitted profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub additional_info: Option<String>,
    pub target_audience: Option<String>,
    pub years_in_business: Option<NumberInput>,
    pub employee_count: Option<NumberInput>,
    pub website: Option<String>,
    pub social_media: Option<SocialMediaFields>,
}

/// Caller-submitted social links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMediaFields {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

impl ProfileFields {
    /// Check required fields and well-formedness, producing trimmed details.
    ///
    /// # Errors
    /// Returns `BizkitError::Validation` listing every missing required field,
    /// or naming the first malformed optional field.
    pub fn validate(&self) -> Result<BusinessDetails> {
        let name = present(self.name.as_deref());
        let category = present(self.category.as_deref());
        let description = present(self.description.as_deref());
        let location = present(self.location.as_deref());
        let contact_number = present(self.contact_number.as_deref());

        let missing: Vec<&str> = [
            ("name", name.is_none()),
            ("category", category.is_none()),
            ("description", description.is_none()),
            ("location", location.is_none()),
            ("contactNumber", contact_number.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (Some(name), Some(category), Some(description), Some(location), Some(contact_number)) =
            (name, category, description, location, contact_number)
        else {
            return Err(BizkitError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        let category = category.parse::<BusinessCategory>().map_err(|_| {
            BizkitError::Validation(format!("Unknown business category: {category}"))
        })?;

        let social = self.social_media.clone().unwrap_or_default();

        Ok(BusinessDetails {
            name: limited("name", name, MAX_SHORT_FIELD_LENGTH)?,
            category,
            description: limited("description", description, MAX_LONG_FIELD_LENGTH)?,
            location: limited("location", location, MAX_SHORT_FIELD_LENGTH)?,
            contact_number: limited("contactNumber", contact_number, MAX_SHORT_FIELD_LENGTH)?,
            additional_info: optional_text(
                "additionalInfo",
                self.additional_info.as_deref(),
                MAX_LONG_FIELD_LENGTH,
            )?,
            target_audience: optional_text(
                "targetAudience",
                self.target_audience.as_deref(),
                MAX_SHORT_FIELD_LENGTH,
            )?,
            years_in_business: integer("yearsInBusiness", self.years_in_business.as_ref(), 0)?,
            employee_count: integer("employeeCount", self.employee_count.as_ref(), 1)?,
            website: link("website", self.website.as_deref())?,
            social_media: SocialMedia {
                facebook: link("socialMedia.facebook", social.facebook.as_deref())?,
                instagram: link("socialMedia.instagram", social.instagram.as_deref())?,
                twitter: link("socialMedia.twitter", social.twitter.as_deref())?,
                linkedin: link("socialMedia.linkedin", social.linkedin.as_deref())?,
            },
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn limited(field: &str, value: &str, max: usize) -> Result<String> {
    if value.chars().count() > max {
        return Err(BizkitError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>> {
    present(value).map(|v| limited(field, v, max)).transpose()
}

fn integer(field: &str, value: Option<&NumberInput>, min: i64) -> Result<Option<u32>> {
    let parsed = match value {
        None => return Ok(None),
        Some(NumberInput::Integer(n)) => *n,
        Some(NumberInput::Float(f)) => whole_number(field, *f)?,
        Some(NumberInput::Text(text)) => match present(Some(text)) {
            None => return Ok(None),
            Some(trimmed) => trimmed.parse::<i64>().map_err(|_| {
                BizkitError::Validation(format!("{field} must be a whole number"))
            })?,
        },
    };

    if parsed < min {
        return Err(BizkitError::Validation(format!("{field} must be at least {min}")));
    }
    u32::try_from(parsed)
        .map(Some)
        .map_err(|_| BizkitError::Validation(format!("{field} is too large")))
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(field: &str, value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(BizkitError::Validation(format!("{field} must be a whole number")));
    }
    Ok(value as i64)
}

fn link(field: &str, value: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(Some(raw.to_string()))
        }
        _ => Err(BizkitError::Validation(format!("{field} must be an absolute http(s) URL"))),
    }
}
