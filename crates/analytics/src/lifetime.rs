//! Lifetime retention curves — the share of a population still active at
//! week 0..=horizon, overall or one column per category value.

use chrono::{DateTime, Utc};
use retention_core::{CategoryDimension, Table, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::percent::retention_pct;
use crate::slicer::slice_population;
use crate::tenure::{mean_tenure_weeks, tenure_weeks};

/// One point of a lifetime retention curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimeCurvePoint {
    pub week: u32,
    pub retention_pct: f64,
}

/// Builder for lifetime retention curves.
pub struct LifetimeCurve;

impl LifetimeCurve {
    /// Default curve horizon: `floor(mean tenure) + 3` weeks, so curves
    /// extend visibly past the average tenure without being dominated by
    /// long-tail outliers. A negative mean (bad data) clamps to week 0.
    pub fn default_horizon(population: &[UserRecord], reference_date: DateTime<Utc>) -> u32 {
        let mean = mean_tenure_weeks(population, reference_date);
        mean.floor().max(0.0) as u32 + 3
    }

    /// Retention curve for `week in 0..=horizon`:
    /// `100 * |{u : tenure_weeks(u) >= week}| / |population|`.
    ///
    /// `horizon` defaults per [`Self::default_horizon`]; callers comparing
    /// slices of the same parent population must pass one shared horizon.
    pub fn build(
        population: &[UserRecord],
        reference_date: DateTime<Utc>,
        horizon: Option<u32>,
    ) -> Vec<LifetimeCurvePoint> {
        let horizon = horizon.unwrap_or_else(|| Self::default_horizon(population, reference_date));
        let tenures: Vec<f64> = population
            .iter()
            .map(|u| tenure_weeks(u, reference_date))
            .collect();

        let curve: Vec<LifetimeCurvePoint> = (0..=horizon)
            .map(|week| {
                let active = tenures.iter().filter(|&&t| t >= week as f64).count();
                LifetimeCurvePoint {
                    week,
                    retention_pct: retention_pct(active, population.len()),
                }
            })
            .collect();

        debug!(
            population = population.len(),
            horizon, "built lifetime retention curve"
        );
        curve
    }

    /// One curve per category value, merged into a wide table: rows are the
    /// shared `week` axis, columns the category values. The horizon, when
    /// not supplied, is derived from the parent population so every slice
    /// shares the same axis and the columns stay joinable.
    pub fn build_sliced(
        population: &[UserRecord],
        dimension: &CategoryDimension,
        reference_date: DateTime<Utc>,
        horizon: Option<u32>,
    ) -> Table<u32, String> {
        let horizon = horizon.unwrap_or_else(|| Self::default_horizon(population, reference_date));
        let slices = slice_population(population, dimension);

        let weeks: Vec<u32> = (0..=horizon).collect();
        let categories: Vec<String> = slices.iter().map(|(c, _)| c.clone()).collect();
        let mut table = Table::zeroed(weeks, categories);

        for (column, (_, slice)) in slices.iter().enumerate() {
            let tenures: Vec<f64> = slice
                .iter()
                .map(|u| tenure_weeks(u, reference_date))
                .collect();
            for week in 0..=horizon {
                let active = tenures.iter().filter(|&&t| t >= week as f64).count();
                table.set(
                    week as usize,
                    column,
                    retention_pct(active, slice.len()),
                );
            }
        }

        debug!(
            attribute = dimension.attribute(),
            categories = table.column_count(),
            horizon,
            "built sliced lifetime retention curves"
        );
        table
    }
}
