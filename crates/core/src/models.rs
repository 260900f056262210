//! Registry of the known priced captioning models.
//!
//! The settings layer guarantees that the selected model always resolves
//! to one of these entries; an unrecognized restored value is forced to
//! [`DEFAULT_MODEL`] before use.

use serde::Serialize;

/// A captioning model together with its display price per image batch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricedModel {
    pub id: &'static str,
    pub price: &'static str,
}

/// All models selectable in the workbench, with display prices.
pub const PRICED_MODELS: &[PricedModel] = &[
    PricedModel { id: "gpt-4.1-mini", price: "$0.40" },
    PricedModel { id: "gpt-4.1-nano", price: "$0.10" },
    PricedModel { id: "gpt-5-nano", price: "$0.05" },
    PricedModel { id: "gpt-5-mini", price: "$0.25" },
    PricedModel { id: "gpt-5.1", price: "$1.25" },
];

/// Model used when a stored selection is absent or unrecognized.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Whether `id` names a known priced model.
pub fn is_known_model(id: &str) -> bool {
    PRICED_MODELS.iter().any(|m| m.id == id)
}

/// Display price for a known model.
pub fn price_label(id: &str) -> Option<&'static str> {
    PRICED_MODELS.iter().find(|m| m.id == id).map(|m| m.price)
}

/// Resolve a stored model selection to a known model, falling back to
/// [`DEFAULT_MODEL`] for unrecognized values.
pub fn resolve_model(id: &str) -> &str {
    if is_known_model(id) {
        id
    } else {
        DEFAULT_MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_known() {
        assert!(is_known_model(DEFAULT_MODEL));
    }

    #[test]
    fn known_models_resolve_to_themselves() {
        for model in PRICED_MODELS {
            assert_eq!(resolve_model(model.id), model.id);
        }
    }

    #[test]
    fn unknown_model_resolves_to_default() {
        assert_eq!(resolve_model("gpt-3.5-turbo"), DEFAULT_MODEL);
        assert_eq!(resolve_model(""), DEFAULT_MODEL);
    }

    #[test]
    fn every_model_has_a_price() {
        for model in PRICED_MODELS {
            assert!(price_label(model.id).is_some());
        }
        assert!(price_label("gpt-3.5-turbo").is_none());
    }
}
