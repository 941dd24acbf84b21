//! Triangular cohort-retention matrices — weekly registration cohorts with
//! retention cells truncated beyond the observed horizon.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use retention_core::{CategoryDimension, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::percent::retention_pct;
use crate::slicer::slice_population;
use crate::tenure::tenure_weeks;

/// One weekly cohort: its start date, size ("Users" column for display),
/// and `week_range + 1` retention cells indexed by weeks since
/// registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortRow {
    pub cohort_start_date: NaiveDate,
    pub cohort_size: u64,
    pub cells: Vec<f64>,
}

/// Triangular retention matrix: `week_range` rows ordered by cohort start
/// date, each with `week_range + 1` cells. Cell `[i][j]` is computed only
/// when `i + j <= week_range`; beyond that it is a structural zero — a
/// deliberate horizon cut, not missing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortMatrix {
    pub week_range: u32,
    pub rows: Vec<CohortRow>,
}

impl CohortMatrix {
    /// Bucket `population` into `week_range` consecutive 7-day registration
    /// cohorts starting at `reference_date` and compute each cohort's
    /// retention cells.
    ///
    /// Bucket *i* covers registrations in
    /// `[reference_date + 7i days, reference_date + 7(i+1) days)`. Users
    /// without an unregistration date are treated as active through the end
    /// of the observed window (`reference_date + 7 * week_range days`), so
    /// the matrix stays a pure function of its inputs.
    pub fn build(
        population: &[UserRecord],
        reference_date: DateTime<Utc>,
        week_range: u32,
    ) -> Self {
        let window_end = reference_date + Duration::weeks(i64::from(week_range));

        let mut rows = Vec::with_capacity(week_range as usize);
        for i in 0..week_range {
            let bucket_start = reference_date + Duration::weeks(i64::from(i));
            let bucket_end = bucket_start + Duration::weeks(1);

            let cohort: Vec<&UserRecord> = population
                .iter()
                .filter(|u| {
                    u.registration_date >= bucket_start && u.registration_date < bucket_end
                })
                .collect();
            let tenures: Vec<f64> = cohort.iter().map(|u| tenure_weeks(u, window_end)).collect();

            let cells: Vec<f64> = (0..=week_range)
                .map(|j| {
                    if i + j > week_range {
                        // Outside the observed horizon.
                        0.0
                    } else {
                        let active = tenures.iter().filter(|&&t| t >= f64::from(j)).count();
                        retention_pct(active, cohort.len())
                    }
                })
                .collect();

            rows.push(CohortRow {
                cohort_start_date: bucket_start.date_naive(),
                cohort_size: cohort.len() as u64,
                cells,
            });
        }

        debug!(
            population = population.len(),
            week_range, "built cohort retention matrix"
        );
        Self { week_range, rows }
    }

    /// One matrix per category value, each computed with the same
    /// `reference_date` and `week_range` so the matrices are comparable.
    /// The category key set is fixed: zero-user categories still produce a
    /// matrix (of empty cohorts, all cells zero).
    pub fn build_sliced(
        population: &[UserRecord],
        dimension: &CategoryDimension,
        reference_date: DateTime<Utc>,
        week_range: u32,
    ) -> Vec<(String, CohortMatrix)> {
        slice_population(population, dimension)
            .into_iter()
            .map(|(category, slice)| {
                let owned: Vec<UserRecord> = slice.into_iter().cloned().collect();
                (category, CohortMatrix::build(&owned, reference_date, week_range))
            })
            .collect()
    }

    /// Cell `[row][weeks_since_registration]`.
    pub fn cell(&self, row: usize, weeks_since_registration: usize) -> f64 {
        self.rows[row].cells[weeks_since_registration]
    }
}
