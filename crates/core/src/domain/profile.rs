use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation outcome for a search profile, carrying every violation found
/// so the form can surface all of them at once.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("search profile validation failed: {}", issues.join("; "))]
pub struct ProfileValidationError {
    pub issues: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentPreference {
    Positive,
    Neutral,
    Negative,
    #[default]
    Any,
}

impl std::str::FromStr for SentimentPreference {
    type Err = ProfileValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            "any" => Ok(Self::Any),
            other => Err(ProfileValidationError {
                issues: vec![format!(
                    "unsupported sentiment preference `{other}` (expected positive|neutral|negative|any)"
                )],
            }),
        }
    }
}

/// Per-aspect preference weights, each nominally in [0, 1]. Field names match
/// the scoring service's schema, which capitalizes them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectPriorities {
    #[serde(rename = "Quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
    #[serde(rename = "Durability", skip_serializing_if = "Option::is_none")]
    pub durability: Option<f64>,
    #[serde(rename = "Installation", skip_serializing_if = "Option::is_none")]
    pub installation: Option<f64>,
    #[serde(rename = "Design", skip_serializing_if = "Option::is_none")]
    pub design: Option<f64>,
    #[serde(rename = "Compatibility", skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<f64>,
    #[serde(rename = "Value", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(rename = "Comfort", skip_serializing_if = "Option::is_none")]
    pub comfort: Option<f64>,
    #[serde(rename = "Performance", skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,
}

/// The last-submitted search form: vehicle, budget bounds, and optional
/// preference weights. Produced by the finder form, held in the session
/// profile slot, consumed once by the results view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub car_brand: String,
    #[serde(default)]
    pub car_model: Option<String>,
    pub budget_min: Decimal,
    pub budget_max: Decimal,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default = "default_quality_threshold")]
    pub quality_threshold: f64,
    #[serde(default)]
    pub sentiment_preference: SentimentPreference,
    #[serde(default)]
    pub emotion_preference: Vec<String>,
    #[serde(default)]
    pub aspect_priorities: Option<AspectPriorities>,
    #[serde(default)]
    pub search_query: Option<String>,
}

fn default_quality_threshold() -> f64 {
    0.3
}

impl UserProfile {
    pub fn new(car_brand: impl Into<String>, budget_min: Decimal, budget_max: Decimal) -> Self {
        Self {
            car_brand: car_brand.into(),
            car_model: None,
            budget_min,
            budget_max,
            preferred_categories: Vec::new(),
            quality_threshold: default_quality_threshold(),
            sentiment_preference: SentimentPreference::default(),
            emotion_preference: Vec::new(),
            aspect_priorities: None,
            search_query: None,
        }
    }

    /// Checks the profile before any network call is made. A failing profile
    /// blocks submission entirely; the error lists every violation.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let mut issues = Vec::new();

        if self.car_brand.trim().is_empty() {
            issues.push("car brand is required".to_string());
        }
        if self.budget_min < Decimal::ZERO {
            issues.push("minimum budget must not be negative".to_string());
        }
        if self.budget_max <= Decimal::ZERO {
            issues.push("maximum budget must be greater than 0".to_string());
        }
        if self.budget_min > self.budget_max {
            issues.push("minimum budget cannot be greater than maximum budget".to_string());
        }
        if !(0.0..=1.0).contains(&self.quality_threshold) {
            issues.push("quality threshold must be between 0 and 1".to_string());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ProfileValidationError { issues })
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{SentimentPreference, UserProfile};

    fn profile() -> UserProfile {
        UserProfile::new("Toyota", Decimal::from(500), Decimal::from(10_000))
    }

    #[test]
    fn well_formed_profile_passes() {
        profile().validate().expect("valid profile");
    }

    #[test]
    fn blank_brand_is_rejected() {
        let mut profile = profile();
        profile.car_brand = "  ".to_string();

        let error = profile.validate().expect_err("blank brand");
        assert_eq!(error.issues, vec!["car brand is required".to_string()]);
    }

    #[test]
    fn inverted_budget_bounds_are_rejected() {
        let mut profile = profile();
        profile.budget_min = Decimal::from(20_000);

        let error = profile.validate().expect_err("min > max");
        assert!(error.issues.iter().any(|issue| issue.contains("cannot be greater")));
    }

    #[test]
    fn all_violations_are_reported_together() {
        let mut profile = profile();
        profile.car_brand = String::new();
        profile.budget_min = Decimal::from(-1);
        profile.budget_max = Decimal::from(-2);
        profile.quality_threshold = 1.5;

        let error = profile.validate().expect_err("multiple violations");
        assert_eq!(error.issues.len(), 5);
    }

    #[test]
    fn sentiment_preference_parses_case_insensitively() {
        assert_eq!("Positive".parse::<SentimentPreference>().expect("parse"), SentimentPreference::Positive);
        assert!("upbeat".parse::<SentimentPreference>().is_err());
    }

    #[test]
    fn sentiment_preference_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentPreference::Any).expect("serialize");
        assert_eq!(json, "\"any\"");
    }
}
