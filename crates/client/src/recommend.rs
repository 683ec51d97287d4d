//! Recommendation calls: stateless request/response wrappers around the
//! external scoring engine. Callers surface failures to the user; nothing
//! here retries.

use gearcart_core::UserProfile;
use reqwest::Method;

use crate::types::{RecommendationResponse, SectionedRecommendationResponse};
use crate::{ApiClient, ServiceError};

impl ApiClient {
    /// Scores the profile and returns the top `top_k` recommendations.
    pub async fn fetch_recommendations(
        &self,
        profile: &UserProfile,
        top_k: u32,
    ) -> Result<RecommendationResponse, ServiceError> {
        self.execute(
            "recommend",
            self.request(Method::POST, "/recommend").query(&[("top_k", top_k)]).json(profile),
        )
        .await
    }

    /// Variant that splits results into exact-vehicle matches and
    /// cross-compatible accessories.
    pub async fn fetch_sectioned_recommendations(
        &self,
        profile: &UserProfile,
        exact_match_count: u32,
        compatible_count: u32,
    ) -> Result<SectionedRecommendationResponse, ServiceError> {
        self.execute(
            "recommend.sectioned",
            self.request(Method::POST, "/recommend/sectioned")
                .query(&[
                    ("exact_match_count", exact_match_count),
                    ("compatible_count", compatible_count),
                ])
                .json(profile),
        )
        .await
    }
}
