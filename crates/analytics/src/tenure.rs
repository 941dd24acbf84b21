//! Tenure — each user's activity span in weeks, anchored to an explicit
//! reference date so computations stay deterministic.

use chrono::{DateTime, Utc};
use retention_core::UserRecord;

/// Activity span in weeks: registration to unregistration, or to the
/// reference date for users still active.
///
/// Kept as a real number (whole days / 7, never rounded); comparisons
/// against integer week offsets use `>=`. A registration date after the
/// reference or unregistration date yields a negative tenure — that is a
/// data-quality signal the caller must tolerate, not something corrected
/// here.
pub fn tenure_weeks(user: &UserRecord, reference_date: DateTime<Utc>) -> f64 {
    let active_until = user.unregistration_date.unwrap_or(reference_date);
    (active_until - user.registration_date).num_days() as f64 / 7.0
}

/// Mean tenure over a population; `0.0` for an empty population.
pub fn mean_tenure_weeks(population: &[UserRecord], reference_date: DateTime<Utc>) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let total: f64 = population
        .iter()
        .map(|u| tenure_weeks(u, reference_date))
        .sum();
    total / population.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(d as i64)
    }

    fn user(registered: DateTime<Utc>, unregistered: Option<DateTime<Utc>>) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            registration_date: registered,
            unregistration_date: unregistered,
            last_login_date: None,
            attributes: Default::default(),
        }
    }

    #[test]
    fn test_active_user_measured_to_reference_date() {
        let u = user(day(0), None);
        assert_eq!(tenure_weeks(&u, day(70)), 10.0);
    }

    #[test]
    fn test_unregistered_user_ignores_reference_date() {
        let u = user(day(0), Some(day(14)));
        // Reference far in the future changes nothing once unregistered.
        assert_eq!(tenure_weeks(&u, day(700)), 2.0);
    }

    #[test]
    fn test_fractional_weeks_not_rounded() {
        let u = user(day(0), Some(day(10)));
        assert!((tenure_weeks(&u, day(10)) - 10.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_registration_after_reference_is_negative() {
        let u = user(day(7), None);
        assert_eq!(tenure_weeks(&u, day(0)), -1.0);
    }

    #[test]
    fn test_mean_tenure_empty_population_is_zero() {
        assert_eq!(mean_tenure_weeks(&[], day(0)), 0.0);
    }

    #[test]
    fn test_mean_tenure_mixed_population() {
        let users = vec![user(day(0), Some(day(14))), user(day(0), None)];
        // 2.0 and 4.0 weeks -> mean 3.0
        assert_eq!(mean_tenure_weeks(&users, day(28)), 3.0);
    }
}
