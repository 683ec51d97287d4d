//! Catalog lookups backing the finder form (brand and model pickers) and the
//! readiness checks.

use reqwest::Method;

use crate::types::{
    BrandsResponse, CategoriesResponse, HealthResponse, ModelsResponse, StatsResponse,
};
use crate::{ApiClient, ServiceError};

impl ApiClient {
    pub async fn brands(&self) -> Result<Vec<String>, ServiceError> {
        let response: BrandsResponse =
            self.execute("catalog.brands", self.request(Method::GET, "/brands")).await?;
        Ok(response.brands)
    }

    pub async fn models_by_brand(&self, brand: &str) -> Result<Vec<String>, ServiceError> {
        let response: ModelsResponse = self
            .execute("catalog.models", self.request(Method::GET, &format!("/models/{brand}")))
            .await?;
        Ok(response.models)
    }

    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        let response: CategoriesResponse =
            self.execute("catalog.categories", self.request(Method::GET, "/categories")).await?;
        Ok(response.categories)
    }

    pub async fn stats(&self) -> Result<StatsResponse, ServiceError> {
        self.execute("catalog.stats", self.request(Method::GET, "/stats")).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ServiceError> {
        self.execute("health", self.request(Method::GET, "/health")).await
    }
}
