/// Gemini provider
///
/// Asks a Gemini model for restaurant recommendations using structured
/// output: the request carries a JSON schema for an array of restaurants,
/// and the model's text answer is parsed against it.
///
/// API Flow:
/// 1. POST /v1beta/models/{model}:generateContent with prompt + response schema
/// 2. Take the first candidate's text, strip any markdown fence, parse JSON
use crate::{
    error::{AppError, AppResult},
    models::{
        gemini::{
            ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse,
            GenerationConfig, Part,
        },
        GeminiRestaurant, Restaurant,
    },
    services::providers::RecommendationProvider,
};
use reqwest::Client as HttpClient;
use serde_json::{json, Value};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_url: String,
    model: String,
    count: u8,
}

impl GeminiProvider {
    pub fn new(api_url: String, model: String, count: u8) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            count,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }

    fn prompt(&self) -> String {
        format!(
            "Recommend {} diverse and interesting restaurants. Vary the cuisines and price \
             ranges. For each restaurant give its name, cuisine, a short enticing description \
             (two sentences at most), a plausible street address, a price range written as \
             \"$\" to \"$$$$\", and an image_prompt: a short visual description of a signature \
             dish or the dining room that could guide an illustration.",
            self.count
        )
    }

    /// Schema for an array of `GeminiRestaurant`, in Gemini's OpenAPI subset
    fn response_schema() -> Value {
        let string = json!({ "type": "STRING" });
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "name": string,
                    "cuisine": string,
                    "description": string,
                    "address": string,
                    "price_range": string,
                    "image_prompt": string,
                },
                "required": ["name", "cuisine", "description", "address", "price_range", "image_prompt"],
                "propertyOrdering": ["name", "cuisine", "description", "address", "price_range", "image_prompt"],
            }
        })
    }

    fn build_request(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(self.prompt()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        }
    }
}

/// Turns a non-2xx body into a readable description
fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            let code = parsed.error.code.unwrap_or(status.as_u16());
            match parsed.error.status {
                Some(kind) => format!("{} ({} {})", parsed.error.message, code, kind),
                None => format!("{} ({})", parsed.error.message, code),
            }
        }
        _ => format!("Gemini API returned status {}: {}", status, body.trim()),
    }
}

/// Removes a surrounding ```json ... ``` fence if the model added one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Extracts restaurant records from a `generateContent` response
pub fn parse_recommendations(response: GenerateContentResponse) -> AppResult<Vec<Restaurant>> {
    let Some(text) = response.first_text() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
            });
        return Err(AppError::MalformedResponse(match reason {
            Some(reason) => format!("Gemini returned no content (reason: {})", reason),
            None => "Gemini returned no content".to_string(),
        }));
    };

    let records: Vec<GeminiRestaurant> = serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| {
            tracing::debug!(text = %text, "Unparseable model output");
            AppError::MalformedResponse(format!("Could not parse recommendations: {}", e))
        })?;

    Ok(records.into_iter().map(Restaurant::from).collect())
}

#[async_trait::async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn fetch_recommendations(&self, api_key: &str) -> AppResult<Vec<Restaurant>> {
        tracing::debug!(model = %self.model, count = self.count, "Requesting recommendations");

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&self.build_request())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                "Gemini request failed"
            );
            return Err(AppError::ExternalApi(describe_api_error(status, &body)));
        }

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::MalformedResponse(format!("Invalid Gemini response envelope: {}", e))
        })?;

        let restaurants = parse_recommendations(envelope)?;

        tracing::info!(
            model = %self.model,
            restaurant_count = restaurants.len(),
            "Fetched recommendations from Gemini"
        );

        Ok(restaurants)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    const TWO_RESTAURANTS: &str = r#"[
        {"name":"Forno","cuisine":"Italian","description":"Pizza.","address":"1 Main St","price_range":"$$","image_prompt":"pizza"},
        {"name":"Sakura","cuisine":"Japanese","description":"Sushi.","address":"2 Elm St","price_range":"$$$","image_prompt":"sushi"}
    ]"#;

    #[test]
    fn test_parse_preserves_order() {
        let restaurants = parse_recommendations(envelope(TWO_RESTAURANTS)).unwrap();
        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[0].name, "Forno");
        assert_eq!(restaurants[1].name, "Sakura");
        assert_ne!(restaurants[0].id, restaurants[1].id);
    }

    #[test]
    fn test_parse_fenced_output() {
        let fenced = format!("```json\n{}\n```", TWO_RESTAURANTS);
        let restaurants = parse_recommendations(envelope(&fenced)).unwrap();
        assert_eq!(restaurants.len(), 2);
    }

    #[test]
    fn test_parse_empty_array() {
        let restaurants = parse_recommendations(envelope("[]")).unwrap();
        assert!(restaurants.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        let result = parse_recommendations(envelope("Sorry, I can't help with that."));
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(err.description().unwrap().contains("Could not parse"));
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        let err = parse_recommendations(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  [2] "), "[2]");
    }

    #[test]
    fn test_describe_api_error() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let described = describe_api_error(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            described,
            "Resource has been exhausted (429 RESOURCE_EXHAUSTED)"
        );

        let described = describe_api_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(described.contains("502"));
        assert!(described.contains("upstream down"));
    }

    #[test]
    fn test_request_shape() {
        let provider = GeminiProvider::new(
            "https://example.test/".to_string(),
            "gemini-test".to_string(),
            4,
        );
        assert_eq!(
            provider.endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );

        let body = serde_json::to_value(provider.build_request()).unwrap();
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Recommend 4 "));
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["items"]["required"]
                .as_array()
                .unwrap()
                .len(),
            6
        );
    }
}
