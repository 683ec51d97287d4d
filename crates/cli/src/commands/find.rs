use clap::Args;
use gearcart_core::{SentimentPreference, SessionProfileStore, UserProfile};
use rust_decimal::Decimal;

use crate::context::AppContext;

use super::CommandResult;

/// Every emotion the engine knows; accepting all of them is the "no
/// preference" default the finder form submits.
const ALL_EMOTIONS: [&str; 5] = ["Happy", "Satisfied", "Neutral", "Frustrated", "Disappointed"];

#[derive(Debug, Args)]
pub struct FindArgs {
    #[arg(long, help = "Vehicle brand (required by the engine)")]
    pub brand: String,
    #[arg(long, help = "Vehicle model")]
    pub model: Option<String>,
    #[arg(long, default_value = "500")]
    pub budget_min: Decimal,
    #[arg(long, default_value = "10000")]
    pub budget_max: Decimal,
    #[arg(long = "category", help = "Preferred category (repeatable)")]
    pub categories: Vec<String>,
    #[arg(long, default_value_t = 0.3, help = "Minimum quality score in [0,1]")]
    pub quality_threshold: f64,
    #[arg(long, default_value = "any", help = "positive|neutral|negative|any")]
    pub sentiment: SentimentPreference,
    #[arg(long, help = "Free-text search query")]
    pub query: Option<String>,
    #[arg(long, default_value_t = 6, help = "Number of recommendations to request")]
    pub top: u32,
    #[arg(long, help = "Split results into exact-match and compatible sections")]
    pub sectioned: bool,
}

pub async fn run(ctx: &AppContext, args: FindArgs) -> CommandResult {
    let mut profile = UserProfile::new(args.brand, args.budget_min, args.budget_max);
    profile.car_model = args.model;
    profile.preferred_categories = args.categories;
    profile.quality_threshold = args.quality_threshold;
    profile.sentiment_preference = args.sentiment;
    profile.emotion_preference = ALL_EMOTIONS.iter().map(|e| e.to_string()).collect();
    profile.search_query = args.query;

    // Validation blocks the submission entirely; nothing is sent.
    if let Err(error) = profile.validate() {
        let mut output = String::from("search blocked:\n");
        for issue in &error.issues {
            output.push_str(&format!("  - {issue}\n"));
        }
        return CommandResult { exit_code: 2, output: output.trim_end().to_string() };
    }

    let slot = ctx.profile_slot();
    slot.set(&profile);
    render_results(ctx, &slot, args.top, args.sectioned).await
}

/// Results step: reads the profile back out of the session slot. An empty
/// slot redirects to the finder form instead of failing.
async fn render_results(
    ctx: &AppContext,
    slot: &SessionProfileStore,
    top: u32,
    sectioned: bool,
) -> CommandResult {
    let Some(profile) = slot.get() else {
        return CommandResult::failure(
            "find",
            "no search submitted yet; fill out the finder form first",
            2,
        );
    };

    if sectioned {
        match ctx.client.fetch_sectioned_recommendations(&profile, top, top).await {
            Ok(response) => {
                let mut output = String::new();
                output.push_str(&format!(
                    "exact matches ({}):\n",
                    response.sections.exact_match.len()
                ));
                for (index, item) in response.sections.exact_match.iter().enumerate() {
                    output.push_str(&render_item(index, item));
                }
                output.push_str(&format!(
                    "compatible with your vehicle ({}):\n",
                    response.sections.compatible.len()
                ));
                for (index, item) in response.sections.compatible.iter().enumerate() {
                    output.push_str(&render_item(index, item));
                }
                CommandResult::success(output.trim_end().to_string())
            }
            Err(error) => CommandResult::failure("find", error.to_string(), 1),
        }
    } else {
        match ctx.client.fetch_recommendations(&profile, top).await {
            Ok(response) if response.success => {
                let mut output =
                    format!("{} recommendations for {}:\n", response.count, profile.car_brand);
                for (index, item) in response.recommendations.iter().enumerate() {
                    output.push_str(&render_item(index, item));
                }
                CommandResult::success(output.trim_end().to_string())
            }
            Ok(response) => CommandResult::failure(
                "find",
                response.error.unwrap_or_else(|| "no recommendations found".to_string()),
                1,
            ),
            Err(error) => CommandResult::failure("find", error.to_string(), 1),
        }
    }
}

fn render_item(index: usize, item: &gearcart_core::Accessory) -> String {
    format!(
        "  {}. [{}] {} — {} ({}, score {:.2})\n",
        index + 1,
        item.accessory_id,
        item.accessory_name,
        item.price,
        item.category,
        item.final_score
    )
}
