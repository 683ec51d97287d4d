//! Wire shapes for the storefront service. Response envelopes carry a
//! `success` flag alongside the payload; request bodies are minimal JSON
//! objects keyed on `accessory_id`.

use gearcart_core::{Accessory, AccessoryId, CartLine};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub recommendations: Vec<Accessory>,
    #[serde(default)]
    pub score_breakdown: Option<ScoreBreakdown>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Component weights behind the final score, as reported by the engine.
#[derive(Clone, Debug, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub car_compatibility: f64,
    #[serde(default)]
    pub content_similarity: f64,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub preference_match: f64,
    #[serde(default)]
    pub emotion_alignment: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SectionedRecommendationResponse {
    pub success: bool,
    pub sections: RecommendationSections,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RecommendationSections {
    #[serde(default)]
    pub exact_match: Vec<Accessory>,
    #[serde(default)]
    pub compatible: Vec<Accessory>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CartItemsResponse {
    pub success: bool,
    #[serde(default)]
    pub items: Vec<CartLine>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WishlistItemsResponse {
    pub success: bool,
    #[serde(default)]
    pub items: Vec<Accessory>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CartMutation {
    pub accessory_id: AccessoryId,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct WishlistMutation {
    pub accessory_id: AccessoryId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BrandsResponse {
    pub brands: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatsResponse {
    pub total_accessories: u64,
    pub total_brands: u64,
    pub total_categories: u64,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{CartItemsResponse, RecommendationResponse, SectionedRecommendationResponse};

    #[test]
    fn decodes_a_recommendation_payload() {
        let raw = r#"{
            "success": true,
            "count": 1,
            "recommendations": [{
                "accessory_id": "ACC-42",
                "accessory_name": "LED Headlight Kit",
                "car_brand": "Toyota",
                "car_model": "Camry",
                "price": 3499.0,
                "category": "Exterior",
                "description": "Bright and efficient.",
                "sentiment_score": 0.91,
                "sentiment_label": "positive",
                "quality_score": 0.84,
                "dominant_emotion": "Happy",
                "final_score": 0.88,
                "explanation": "Matches your vehicle and budget.",
                "compatible_cars": "Camry, Corolla"
            }],
            "score_breakdown": {
                "car_compatibility": 0.4,
                "content_similarity": 0.2,
                "quality_score": 0.2,
                "preference_match": 0.1,
                "emotion_alignment": 0.1
            }
        }"#;

        let response: RecommendationResponse = serde_json::from_str(raw).expect("decode");
        assert!(response.success);
        assert_eq!(response.recommendations.len(), 1);
        assert_eq!(response.recommendations[0].price, Decimal::from(3499));
        assert!(response.score_breakdown.is_some());
    }

    #[test]
    fn decodes_a_cart_items_payload() {
        let raw = r#"{
            "success": true,
            "items": [
                {"accessory_id": "ACC-1", "accessory_name": "Seat Cover", "price": 1200, "quantity": 2}
            ]
        }"#;

        let response: CartItemsResponse = serde_json::from_str(raw).expect("decode");
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.items[0].subtotal(), Decimal::from(2400));
    }

    #[test]
    fn decodes_a_sectioned_payload_with_empty_sections() {
        let raw = r#"{"success": true, "sections": {"exact_match": [], "compatible": []}}"#;
        let response: SectionedRecommendationResponse = serde_json::from_str(raw).expect("decode");
        assert!(response.sections.exact_match.is_empty());
    }
}
