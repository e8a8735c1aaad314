//! # GraphQL Query Resolver
//!
//! Read-only views over the same aggregation routines as the REST endpoints.

use async_graphql::{Context, ErrorExtensions, Object, Result};
use gtd_analytics::Category;

use crate::context::ApiContext;
use crate::schema::*;

/// GraphQL Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    // =========================================================================
    // COUNTS
    // =========================================================================

    /// Number of loaded events
    async fn event_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx
            .query("event_count", |e| e.event_count())
            .await
            .map_err(|e| e.extend())
    }

    /// Events per year, year ascending
    async fn yearly_counts(&self, ctx: &Context<'_>) -> Result<Vec<YearCount>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let counts = api_ctx
            .query("yearly_counts", |e| e.yearly_counts())
            .await
            .map_err(|e| e.extend())?;
        Ok(counts.into_iter().map(YearCount::from).collect())
    }

    /// Events per attack type, most frequent first
    async fn attack_type_counts(&self, ctx: &Context<'_>) -> Result<Vec<CategoryCount>> {
        category_counts(ctx, Category::AttackType, None).await
    }

    /// Events per weapon type, most frequent first
    async fn weapon_counts(&self, ctx: &Context<'_>) -> Result<Vec<CategoryCount>> {
        category_counts(ctx, Category::WeaponType, None).await
    }

    /// Countries with the most events
    async fn top_countries(
        &self,
        ctx: &Context<'_>,
        #[graphql(
            desc = "Number of countries (default: configured limit, max: 250)",
            validator(minimum = 1, maximum = 250)
        )]
        limit: Option<i32>,
    ) -> Result<Vec<CategoryCount>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let limit = match limit {
            Some(n) => usize::try_from(n)?,
            None => api_ctx.settings.top_countries,
        };
        category_counts(ctx, Category::Country, Some(limit)).await
    }

    /// Events per (year, attack type)
    async fn attack_types_over_time(&self, ctx: &Context<'_>) -> Result<Vec<YearlyAttackCount>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let rows = api_ctx
            .query("attack_types_over_time", |e| e.attack_types_over_time())
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(YearlyAttackCount::from).collect())
    }

    // =========================================================================
    // CASUALTIES
    // =========================================================================

    /// Casualty sums per region, highest total first
    async fn region_casualties(&self, ctx: &Context<'_>) -> Result<Vec<RegionCasualties>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let rows = api_ctx
            .query("region_casualties", |e| e.region_casualties())
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(RegionCasualties::from).collect())
    }

    /// Casualty sums per year
    async fn yearly_casualties(&self, ctx: &Context<'_>) -> Result<Vec<YearlyCasualties>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let rows = api_ctx
            .query("yearly_casualties", |e| e.yearly_casualties())
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(YearlyCasualties::from).collect())
    }

    // =========================================================================
    // WEAPONS
    // =========================================================================

    /// Average casualties and usage per weapon type
    async fn weapon_stats(&self, ctx: &Context<'_>) -> Result<Vec<WeaponStat>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let stats = api_ctx
            .query("weapon_stats", |e| e.weapon_stats())
            .await
            .map_err(|e| e.extend())?;
        Ok(stats.into_iter().map(WeaponStat::from).collect())
    }

    /// Weapon usage hypothesis test
    async fn weapon_hypothesis_test(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Variance assumption (default: configured)")]
        variance: Option<Variance>,
    ) -> Result<HypothesisResult> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let variance = variance.map_or(api_ctx.settings.variance, Into::into);
        let outcome = api_ctx
            .query("weapon_hypothesis_test", move |e| e.weapon_hypothesis_test(variance))
            .await
            .map_err(|e| e.extend())?;
        Ok(outcome.into())
    }

    // =========================================================================
    // EVENTS & OVERVIEW
    // =========================================================================

    /// Located events in load order
    async fn global_distribution(&self, ctx: &Context<'_>) -> Result<Vec<GeoPoint>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let points = api_ctx
            .query("geo_points", |e| e.geo_points())
            .await
            .map_err(|e| e.extend())?;
        Ok(points.into_iter().map(GeoPoint::from).collect())
    }

    /// First events in load order
    async fn sample(
        &self,
        ctx: &Context<'_>,
        #[graphql(
            desc = "Number of events (default: configured, max: 1000)",
            validator(minimum = 0, maximum = 1000)
        )]
        limit: Option<i32>,
    ) -> Result<Vec<Event>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let rows = match limit {
            Some(n) => usize::try_from(n)?,
            None => api_ctx.settings.sample_rows,
        };
        let events = api_ctx
            .query("sample", move |e| e.sample(rows))
            .await
            .map_err(|e| e.extend())?;
        Ok(events.into_iter().map(Event::from).collect())
    }

    /// Summary statistics of the numeric columns
    async fn overview(&self, ctx: &Context<'_>) -> Result<Vec<ColumnSummary>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let overview = api_ctx
            .query("describe", |e| e.describe())
            .await
            .map_err(|e| e.extend())?;
        Ok(overview.into_iter().map(ColumnSummary::from).collect())
    }

    /// Missing values per column
    async fn missing_values(&self, ctx: &Context<'_>) -> Result<Vec<MissingValues>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let missing = api_ctx
            .query("missing_values", |e| e.missing_values())
            .await
            .map_err(|e| e.extend())?;
        Ok(missing.into_iter().map(MissingValues::from).collect())
    }

    // =========================================================================
    // REPORT
    // =========================================================================

    /// Every aggregation and the hypothesis test in one document
    async fn report(
        &self,
        ctx: &Context<'_>,
        #[graphql(default, desc = "Output format (default: MARKDOWN)")] format: ReportFormat,
    ) -> Result<String> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let settings = api_ctx.settings;
        api_ctx
            .query("report", move |e| match format {
                ReportFormat::Markdown => {
                    e.generate_report_markdown(settings.top_countries, settings.variance)
                }
                ReportFormat::Json => {
                    e.generate_report_json(settings.top_countries, settings.variance)
                }
            })
            .await
            .map_err(|e| e.extend())
    }
}

async fn category_counts(
    ctx: &Context<'_>,
    category: Category,
    limit: Option<usize>,
) -> Result<Vec<CategoryCount>> {
    let api_ctx = ctx.data::<ApiContext>()?;
    let counts = api_ctx
        .query("value_counts", move |e| e.value_counts(category, limit))
        .await
        .map_err(|e| e.extend())?;
    Ok(counts.into_iter().map(CategoryCount::from).collect())
}
