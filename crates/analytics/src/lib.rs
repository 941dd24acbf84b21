//! Cohort-retention analytics — lifetime retention curves, triangular
//! cohort matrices, category slicing, and population breakdowns.
//!
//! Every computation is a pure function of an in-memory population, an
//! explicit reference date, and caller-supplied horizon/week-range
//! parameters; there is no clock access, cache, or I/O.

pub mod cohort;
pub mod counts;
pub mod lifetime;
pub mod percent;
pub mod slicer;
pub mod tenure;

pub use cohort::{CohortMatrix, CohortRow};
pub use counts::{count_categories, CategoryCount};
pub use lifetime::{LifetimeCurve, LifetimeCurvePoint};
pub use slicer::slice_population;
pub use tenure::tenure_weeks;
