//! Supported models and their provider adapters.
//!
//! [`Model`] is the closed set of model identifiers accepted in the
//! `default_model` setting. Each variant knows its vendor model name and
//! the [`ProviderAdapter`] that speaks its API, so dispatch is a single
//! `match` here rather than conditionals at the call site.

use std::fmt;
use std::str::FromStr;

use crate::error::ProviderError;
use crate::gemini::GeminiAdapter;
use crate::openai::OpenAiAdapter;
use crate::provider::ProviderAdapter;

static OPENAI: OpenAiAdapter = OpenAiAdapter;
static GEMINI: GeminiAdapter = GeminiAdapter;

/// A model selectable in settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Model {
    /// OpenAI `gpt-3.5-turbo`, the fallback when no model is configured.
    #[default]
    Gpt35Turbo,
    /// OpenAI `gpt-4o`.
    Gpt4o,
    /// Google Gemini.
    Gemini,
}

impl Model {
    /// Every supported model, in display order.
    pub const ALL: [Model; 3] = [Self::Gpt35Turbo, Self::Gpt4o, Self::Gemini];

    /// Returns the settings identifier of this model.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4o => "gpt-4o",
            Self::Gemini => "gemini",
        }
    }

    /// Returns the vendor's model name sent in the request.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4o => "gpt-4o",
            Self::Gemini => "gemini-1.5-flash",
        }
    }

    /// Returns the adapter for this model's provider.
    pub fn adapter(&self) -> &'static dyn ProviderAdapter {
        match self {
            Self::Gpt35Turbo | Self::Gpt4o => &OPENAI,
            Self::Gemini => &GEMINI,
        }
    }

    /// Resolves an optional settings value, falling back to the default
    /// model when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an unknown-model error for an unrecognized identifier.
    pub fn from_setting(value: Option<&str>) -> Result<Self, ProviderError> {
        match value {
            Some(id) => id.parse(),
            None => Ok(Self::default()),
        }
    }
}

impl FromStr for Model {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.id() == s.trim())
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(Model::id).collect();
                ProviderError::unknown_model(format!(
                    "{:?} is not supported, expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorKind;

    #[test]
    fn default_model_is_gpt35() {
        assert_eq!(Model::from_setting(None).unwrap(), Model::Gpt35Turbo);
        assert_eq!(Model::default().id(), "gpt-3.5-turbo");
    }

    #[test]
    fn parse_known_ids() {
        assert_eq!("gpt-4o".parse::<Model>().unwrap(), Model::Gpt4o);
        assert_eq!("gemini".parse::<Model>().unwrap(), Model::Gemini);
        assert_eq!(
            Model::from_setting(Some("gpt-3.5-turbo")).unwrap(),
            Model::Gpt35Turbo
        );
    }

    #[test]
    fn parse_unknown_id_errors() {
        let err = "claude".parse::<Model>().unwrap_err();
        assert_eq!(err.kind(), ProviderErrorKind::UnknownModel);
        assert!(err.message().contains("gpt-4o"));
    }

    #[test]
    fn adapters_by_provider() {
        assert_eq!(Model::Gpt35Turbo.adapter().name(), "openai");
        assert_eq!(Model::Gpt4o.adapter().name(), "openai");
        assert_eq!(Model::Gemini.adapter().name(), "gemini");
    }

    #[test]
    fn display_uses_id() {
        for model in Model::ALL {
            assert_eq!(model.to_string(), model.id());
            assert_eq!(model.id().parse::<Model>().unwrap(), model);
        }
    }
}
