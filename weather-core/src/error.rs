use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors surfaced by [`WeatherProvider`](crate::WeatherProvider) operations.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The configuration has no API key but the operation needs one.
    ///
    /// Recoverable: set a key and retry.
    #[error("An API key is required for this request.\nHint: run `weather configure <provider>` and enter your API key.")]
    ApiKeyRequired,

    /// The provider was used before [`set_config`](crate::WeatherProvider::set_config).
    #[error("Weather provider used before a configuration was set")]
    NotConfigured,

    /// The fetched document could not be interpreted.
    #[error("Failed to parse weather document: {0}")]
    Parsing(#[from] ParseError),
}

impl WeatherError {
    /// Whether the caller can reasonably fix the input and try again.
    pub fn is_retryable(&self) -> bool {
        match self {
            WeatherError::ApiKeyRequired => true,
            WeatherError::NotConfigured => false,
            WeatherError::Parsing(_) => false,
        }
    }
}

/// Low-level cause of a [`WeatherError::Parsing`] failure.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("missing attribute `{attr}` on <{tag}>")]
    MissingAttribute { tag: String, attr: &'static str },

    #[error("invalid value `{value}` for attribute `{attr}` on <{tag}>")]
    InvalidValue {
        tag: String,
        attr: &'static str,
        value: String,
    },

    #[error("text for <{field}> found outside of any <place>")]
    OrphanText { field: &'static str },

    #[error("document ended inside <{0}>")]
    Unclosed(String),
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_required_is_retryable_but_not_configured_is_not() {
        assert!(WeatherError::ApiKeyRequired.is_retryable());
        assert!(!WeatherError::NotConfigured.is_retryable());
    }

    #[test]
    fn parsing_failure_keeps_the_cause_in_its_message() {
        let err: WeatherError = ParseError::MissingAttribute {
            tag: "yweather:wind".into(),
            attr: "chill",
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("Failed to parse weather document"));
        assert!(msg.contains("missing attribute `chill` on <yweather:wind>"));
    }
}
