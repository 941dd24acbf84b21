//! Category population breakdowns — a direct tally per category value,
//! produced before any retention slicing is meaningful to a consumer.

use retention_core::{CategoryDimension, UserRecord};
use serde::{Deserialize, Serialize};

use crate::slicer::slice_population;

/// Population count for one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub users: u64,
}

/// Tally `population` by `dimension`, one entry per category value in the
/// slicer's stable order. Zero-user brackets are reported, not dropped.
pub fn count_categories(
    population: &[UserRecord],
    dimension: &CategoryDimension,
) -> Vec<CategoryCount> {
    slice_population(population, dimension)
        .into_iter()
        .map(|(category, users)| CategoryCount {
            category,
            users: users.len() as u64,
        })
        .collect()
}
