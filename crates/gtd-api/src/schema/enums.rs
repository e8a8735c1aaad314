//! # GraphQL Enum Types

use async_graphql::Enum;
use gtd_domain as domain;

/// Variance assumption of the two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum Variance {
    /// Student's t-test, equal variances
    Pooled,
    /// Welch's t-test, unequal variances
    Welch,
}

impl From<domain::VarianceAssumption> for Variance {
    fn from(v: domain::VarianceAssumption) -> Self {
        match v {
            domain::VarianceAssumption::Pooled => Self::Pooled,
            domain::VarianceAssumption::Welch => Self::Welch,
        }
    }
}

impl From<Variance> for domain::VarianceAssumption {
    fn from(v: Variance) -> Self {
        match v {
            Variance::Pooled => Self::Pooled,
            Variance::Welch => Self::Welch,
        }
    }
}

/// Hypothesis test verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// p-value at or below the significance level
    Confirmed,
    /// p-value above the significance level, or undefined
    Rejected,
}

impl From<domain::Verdict> for Verdict {
    fn from(v: domain::Verdict) -> Self {
        match v {
            domain::Verdict::Confirmed => Self::Confirmed,
            domain::Verdict::Rejected => Self::Rejected,
        }
    }
}

/// Text format of the analytics report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}
