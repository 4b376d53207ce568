//! Profile enhancer - generated enhancement with a deterministic fallback

use std::sync::Arc;
use std::time::{Duration, Instant};

use bizkit_domain::constants::{MAX_ENHANCEMENT_TIMEOUT_SECS, MIN_ENHANCEMENT_TIMEOUT_SECS};
use bizkit_domain::utils::duration_millis;
use bizkit_domain::{BizkitError, BusinessCategory, BusinessDetails, EnhancedProfile, Result};
use tracing::{debug, info, warn};

use super::ports::TextGenerator;
use super::prompt::{build_prompt, parse_enhancement};

/// Inputs the enhancer works from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancementRequest<'a> {
    pub name: &'a str,
    pub category: BusinessCategory,
    pub description: &'a str,
    pub location: &'a str,
    pub additional_info: Option<&'a str>,
}

impl<'a> From<&'a BusinessDetails> for EnhancementRequest<'a> {
    fn from(details: &'a BusinessDetails) -> Self {
        Self {
            name: &details.name,
            category: details.category,
            description: &details.description,
            location: &details.location,
            additional_info: details.additional_info.as_deref(),
        }
    }
}

/// Where an enhancement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementSource {
    Generated,
    Template,
}

impl EnhancementSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Template => "template",
        }
    }
}

/// Enhancement plus its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementOutcome {
    pub profile: EnhancedProfile,
    pub source: EnhancementSource,
}

/// Produces an [`EnhancedProfile`] for every request.
///
/// When `additional_info` is present and a generator is configured, the
/// generator is called once, bounded by `timeout`. Any failure (transport,
/// timeout, malformed or empty reply) falls back to
/// [`EnhancedProfile::template`]. Enhancement never fails.
pub struct ProfileEnhancer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl ProfileEnhancer {
    /// Create an enhancer. The timeout is clamped to the supported range.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        let timeout = timeout.clamp(
            Duration::from_secs(MIN_ENHANCEMENT_TIMEOUT_SECS),
            Duration::from_secs(MAX_ENHANCEMENT_TIMEOUT_SECS),
        );
        Self { generator, timeout }
    }

    /// Enhancer that always uses the template
    pub fn template_only() -> Self {
        Self { generator: None, timeout: Duration::from_secs(MIN_ENHANCEMENT_TIMEOUT_SECS) }
    }

    /// Effective call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Produce an enhancement for `request`
    pub async fn enhance(&self, request: EnhancementRequest<'_>) -> EnhancedProfile {
        self.enhance_detailed(request).await.profile
    }

    /// Produce an enhancement and report whether it was generated
    pub async fn enhance_detailed(&self, request: EnhancementRequest<'_>) -> EnhancementOutcome {
        let additional = request.additional_info.map(str::trim).filter(|s| !s.is_empty());

        let (Some(generator), Some(_)) = (self.generator.as_ref(), additional) else {
            debug!(source = "template", "No additional info or generator; using template");
            return Self::fallback(&request);
        };

        let started = Instant::now();
        match self.generate(generator.as_ref(), &request).await {
            Ok(profile) => {
                info!(
                    provider = generator.provider_name(),
                    duration_ms = duration_millis(started.elapsed()),
                    source = EnhancementSource::Generated.as_str(),
                    "Enhanced business profile"
                );
                EnhancementOutcome { profile, source: EnhancementSource::Generated }
            }
            Err(err) => {
                warn!(
                    provider = generator.provider_name(),
                    duration_ms = duration_millis(started.elapsed()),
                    error = %err,
                    source = EnhancementSource::Template.as_str(),
                    "Enhancement failed; using template"
                );
                Self::fallback(&request)
            }
        }
    }

    async fn generate(
        &self,
        generator: &dyn TextGenerator,
        request: &EnhancementRequest<'_>,
    ) -> Result<EnhancedProfile> {
        let prompt = build_prompt(request);
        let reply = tokio::time::timeout(self.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| {
                BizkitError::Enhancement(format!(
                    "Text generator timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;
        parse_enhancement(&reply)
    }

    fn fallback(request: &EnhancementRequest<'_>) -> EnhancementOutcome {
        EnhancementOutcome {
            profile: EnhancedProfile::template(
                request.name,
                request.category,
                request.location,
                request.description,
            ),
            source: EnhancementSource::Template,
        }
    }
}

impl std::fmt::Debug for ProfileEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileEnhancer")
            .field("generator", &self.generator.as_ref().map(|g| g.provider_name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
