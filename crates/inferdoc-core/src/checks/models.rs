use super::{CheckContext, DiagnosticCheck, MODEL_AVAILABILITY};
use crate::result::CheckResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;

/// Model ids extracted from a listing response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelListing {
    /// Ids, in listing order
    pub ids: Vec<String>,
    /// Entries that carried no usable id
    pub entries_without_id: usize,
}

impl ModelListing {
    /// Whether some entries could not be read
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.entries_without_id > 0
    }
}

/// Parse a bare array of `{id}` objects or a `{data: [...]}` envelope.
#[must_use]
pub fn parse_model_listing(body: &Value) -> Option<ModelListing> {
    let entries = match body {
        Value::Array(items) => items,
        Value::Object(map) => map.get("data")?.as_array()?,
        _ => return None,
    };

    let mut listing = ModelListing::default();
    for entry in entries {
        match entry.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => listing.ids.push(id.to_string()),
            _ => listing.entries_without_id += 1,
        }
    }
    Some(listing)
}

/// Membership of each configured model in the provider's listing
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelAvailabilityCheck;

#[async_trait]
impl DiagnosticCheck for ModelAvailabilityCheck {
    fn name(&self) -> &'static str {
        MODEL_AVAILABILITY
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult {
        let response = match ctx.client.get(&ctx.config.models_path).await {
            Ok(response) => response,
            Err(e) => {
                return CheckResult::from_http_error(MODEL_AVAILABILITY, &e)
                    .with_recommendation("Check API connectivity")
            }
        };

        if !response.is_success() {
            return CheckResult::fail(
                MODEL_AVAILABILITY,
                format!("cannot fetch model list (status {})", response.status),
            )
            .with_status_code(response.status)
            .with_recommendation("Check API connectivity");
        }

        let listing = match response
            .json::<Value>()
            .ok()
            .as_ref()
            .and_then(parse_model_listing)
        {
            Some(listing) => listing,
            None => {
                return CheckResult::fail(MODEL_AVAILABILITY, "model list response was not understood")
                    .with_status_code(response.status)
                    .with_recommendation("Check that base_url points at the inference API")
            }
        };

        let available: HashSet<&str> = listing.ids.iter().map(String::as_str).collect();
        let requested: Vec<&str> = ctx
            .config
            .models_to_test
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();

        let mut per_model = serde_json::Map::new();
        let mut missing = Vec::new();
        for model in &requested {
            let found = available.contains(model);
            per_model.insert(
                (*model).to_string(),
                Value::from(if found { "available" } else { "unavailable" }),
            );
            if !found {
                missing.push(*model);
            }
        }

        let result = if !missing.is_empty() {
            CheckResult::fail(
                MODEL_AVAILABILITY,
                format!("unavailable models: {}", missing.join(", ")),
            )
            .with_recommendation(
                "Check model name spelling or use /models endpoint to see available models",
            )
        } else if listing.is_partial() {
            CheckResult::warn(
                MODEL_AVAILABILITY,
                format!(
                    "all {} requested models listed, but {} entries had no id",
                    requested.len(),
                    listing.entries_without_id
                ),
            )
        } else {
            CheckResult::pass(
                MODEL_AVAILABILITY,
                format!("all {} requested models are available", requested.len()),
            )
        };

        result
            .with_detail("models", Value::Object(per_model))
            .with_detail("available_count", listing.ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let listing = parse_model_listing(&json!([{"id": "a"}, {"id": "b"}])).unwrap();
        assert_eq!(listing.ids, vec!["a", "b"]);
        assert!(!listing.is_partial());
    }

    #[test]
    fn test_parse_envelope() {
        let listing =
            parse_model_listing(&json!({"object": "list", "data": [{"id": "a"}, {"name": "x"}]}))
                .unwrap();
        assert_eq!(listing.ids, vec!["a"]);
        assert_eq!(listing.entries_without_id, 1);
        assert!(listing.is_partial());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(parse_model_listing(&json!("models")).is_none());
        assert!(parse_model_listing(&json!({"models": []})).is_none());
    }
}
