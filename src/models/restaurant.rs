use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recommended restaurant shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Restaurant {
    /// Opaque identifier assigned when the record is received
    pub id: String,
    pub name: String,
    /// Cuisine category (e.g., "Italian", "Thai")
    pub cuisine: String,
    pub description: String,
    pub address: String,
    /// Price range label (e.g., "$$", "$$$")
    pub price_range: String,
    /// Text prompt describing a representative image; used as alt text
    pub image_prompt: String,
}

/// Restaurant record as returned by the model, before an id is assigned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeminiRestaurant {
    pub name: String,
    pub cuisine: String,
    pub description: String,
    pub address: String,
    pub price_range: String,
    pub image_prompt: String,
}

impl From<GeminiRestaurant> for Restaurant {
    fn from(raw: GeminiRestaurant) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: raw.name,
            cuisine: raw.cuisine,
            description: raw.description,
            address: raw.address,
            price_range: raw.price_range,
            image_prompt: raw.image_prompt,
        }
    }
}
