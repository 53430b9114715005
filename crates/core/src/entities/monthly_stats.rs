//! Monthly per-platform account statistics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::Entity;
use crate::listing::Searchable;
use crate::rules::{known_platform, not_blank};
use crate::schema::FormSchema;

pub struct MonthlyPlatformStats;

impl Entity for MonthlyPlatformStats {
    const NAME: &'static str = "monthly platform stats";
    const PATH: &'static str = "/api/detailaccount";
    type Form = MonthlyStatsForm;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MonthlyStatsForm {
    /// Account handle the numbers belong to.
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Account is required"),
        length(max = 150, message = "Account must be at most 150 characters")
    )]
    pub account: String,

    #[serde(default)]
    #[validate(custom(function = "known_platform"))]
    pub platform: String,

    #[validate(
        required(message = "Month is required"),
        range(min = 1, max = 12, message = "Month must be between 1 and 12")
    )]
    pub month: Option<i64>,

    #[validate(
        required(message = "Year is required"),
        range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100")
    )]
    pub year: Option<i64>,

    #[validate(
        required(message = "Followers is required"),
        range(min = 0, message = "Followers cannot be negative")
    )]
    pub followers: Option<i64>,

    #[validate(
        required(message = "Following is required"),
        range(min = 0, message = "Following cannot be negative")
    )]
    pub following: Option<i64>,

    #[validate(
        required(message = "Posts is required"),
        range(min = 0, message = "Posts cannot be negative")
    )]
    pub posts: Option<i64>,

    #[validate(
        required(message = "Reach is required"),
        range(min = 0, message = "Reach cannot be negative")
    )]
    pub reach: Option<i64>,

    #[validate(
        required(message = "Impressions is required"),
        range(min = 0, message = "Impressions cannot be negative")
    )]
    pub impressions: Option<i64>,

    /// Percentage, e.g. `4.2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Engagement rate must be between 0 and 100"
    ))]
    pub engagement_rate: Option<f64>,
}

impl MonthlyStatsForm {
    /// `YYYY-MM` label for tables.
    pub fn period(&self) -> String {
        match (self.year, self.month) {
            (Some(y), Some(m)) => format!("{y:04}-{m:02}"),
            _ => "-".to_string(),
        }
    }
}

impl FormSchema for MonthlyStatsForm {}

impl Searchable for MonthlyStatsForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.account.as_str(), self.platform.as_str()]
    }
}
