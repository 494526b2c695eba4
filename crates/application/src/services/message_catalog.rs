//! Display text for fare failures
//!
//! The engine only selects a failure key; the caller supplies the text.

use std::collections::HashMap;

use domain::FareFailure;
use serde::{Deserialize, Serialize};

/// Caller-provided mapping from failure keys to display strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Create a catalog from key/text pairs
    #[must_use]
    pub const fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Built-in English texts
    #[must_use]
    pub fn english() -> Self {
        let messages = FareFailure::ALL
            .iter()
            .map(|failure| {
                let text = match failure {
                    FareFailure::MissingInput => "Please fill in all required fields.",
                    FareFailure::GeocodeFailedStart => "The start address could not be found.",
                    FareFailure::GeocodeFailedEnd => "The destination address could not be found.",
                    FareFailure::GeocodeFailedBoth => {
                        "Neither the start nor the destination address could be found."
                    }
                    FareFailure::RoutingFailed => "No route could be calculated.",
                    FareFailure::Generic => "An error occurred. Please try again.",
                };
                (failure.key().to_string(), text.to_string())
            })
            .collect();
        Self { messages }
    }

    /// Text for a failure, falling back to its key
    #[must_use]
    pub fn message_for(&self, failure: FareFailure) -> String {
        self.messages
            .get(failure.key())
            .cloned()
            .unwrap_or_else(|| failure.key().to_string())
    }

    /// Overlay entries from another catalog
    #[must_use]
    pub fn merged_with(mut self, other: &Self) -> Self {
        self.messages.extend(
            other
                .messages
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self
    }

    /// Whether the catalog has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_covers_every_failure() {
        let catalog = MessageCatalog::english();
        for failure in FareFailure::ALL {
            assert_ne!(catalog.message_for(failure), failure.key());
        }
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.message_for(FareFailure::RoutingFailed), "routing");
    }

    #[test]
    fn caller_text_overrides_defaults() {
        let caller = MessageCatalog::new(HashMap::from([(
            "routing".to_string(),
            "Keine Route gefunden".to_string(),
        )]));
        let catalog = MessageCatalog::english().merged_with(&caller);
        assert_eq!(
            catalog.message_for(FareFailure::RoutingFailed),
            "Keine Route gefunden"
        );
        assert_eq!(
            catalog.message_for(FareFailure::Generic),
            "An error occurred. Please try again."
        );
    }

    #[test]
    fn deserializes_from_plain_map() {
        let catalog: MessageCatalog =
            serde_json::from_str(r#"{"generic": "Fehler"}"#).unwrap();
        assert_eq!(catalog.message_for(FareFailure::Generic), "Fehler");
        assert!(!catalog.is_empty());
    }
}
