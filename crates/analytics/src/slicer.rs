//! Category slicing — partitions a population into named sub-populations
//! by one categorical dimension, uniformly for nominal attributes and
//! externally supplied numeric brackets.

use std::collections::BTreeMap;

use retention_core::types::UNKNOWN_CATEGORY;
use retention_core::{CategoryDimension, UserRecord};

/// Partition `population` by `dimension`.
///
/// Returns `(category, sub-population)` pairs in a stable order: sorted
/// distinct values for nominal dimensions, supplied bracket order for
/// bucketed ones. Bucketed slices always list every bracket, including
/// empty ones; users matching no bracket are excluded from all slices.
/// Nominal slices cover the whole population — records without a usable
/// value land in the `"unknown"` category.
pub fn slice_population<'a>(
    population: &'a [UserRecord],
    dimension: &CategoryDimension,
) -> Vec<(String, Vec<&'a UserRecord>)> {
    match dimension {
        CategoryDimension::Nominal { attribute } => {
            let mut slices: BTreeMap<String, Vec<&UserRecord>> = BTreeMap::new();
            for user in population {
                let category = user
                    .attribute_text(attribute)
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
                slices.entry(category).or_default().push(user);
            }
            slices.into_iter().collect()
        }
        CategoryDimension::Bucketed {
            attribute,
            brackets,
        } => {
            let mut slices: Vec<(String, Vec<&UserRecord>)> = brackets
                .iter()
                .map(|b| (b.label.clone(), Vec::new()))
                .collect();
            for user in population {
                let Some(value) = user.attribute_number(attribute) else {
                    continue;
                };
                // First matching bracket wins.
                if let Some(index) = brackets.iter().position(|b| b.contains(value)) {
                    slices[index].1.push(user);
                }
            }
            slices
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use retention_core::AgeBracket;
    use uuid::Uuid;

    fn user(attrs: &[(&str, serde_json::Value)]) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            registration_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            unregistration_date: None,
            last_login_date: None,
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn age_brackets() -> Vec<AgeBracket> {
        vec![
            AgeBracket::new("18-25", 18, 26),
            AgeBracket::new("26-40", 26, 41),
            AgeBracket::new("41-60", 41, 61),
            AgeBracket::new("61+", 61, 200),
        ]
    }

    // 1. Nominal slicing ------------------------------------------------

    #[test]
    fn test_nominal_slices_partition_population() {
        let population = vec![
            user(&[("gender", serde_json::json!("female"))]),
            user(&[("gender", serde_json::json!("male"))]),
            user(&[("gender", serde_json::json!("female"))]),
            user(&[]), // no gender attribute
        ];
        let dim = CategoryDimension::nominal("gender").unwrap();
        let slices = slice_population(&population, &dim);

        let total: usize = slices.iter().map(|(_, users)| users.len()).sum();
        assert_eq!(total, population.len());

        let keys: Vec<&str> = slices.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["female", "male", "unknown"]);
        assert_eq!(slices[0].1.len(), 2);
        assert_eq!(slices[2].1.len(), 1);
    }

    #[test]
    fn test_nominal_order_is_stable_across_input_orders() {
        let a = user(&[("source", serde_json::json!("ads"))]);
        let b = user(&[("source", serde_json::json!("organic"))]);
        let dim = CategoryDimension::nominal("source").unwrap();

        let one_order = [a.clone(), b.clone()];
        let other_order = [b, a];
        let forward: Vec<String> = slice_population(&one_order, &dim)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        let reverse: Vec<String> = slice_population(&other_order, &dim)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(forward, reverse);
    }

    // 2. Bucketed slicing -----------------------------------------------

    #[test]
    fn test_bracket_slices_keep_empty_buckets_and_drop_unmatched() {
        let population = vec![
            user(&[("age", serde_json::json!(22))]),
            user(&[("age", serde_json::json!(35))]),
            user(&[("age", serde_json::json!(17))]), // below every bracket
        ];
        let dim = CategoryDimension::bucketed("age", age_brackets()).unwrap();
        let slices = slice_population(&population, &dim);

        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].1.len(), 1); // 18-25
        assert_eq!(slices[1].1.len(), 1); // 26-40
        assert_eq!(slices[2].1.len(), 0); // 41-60 still present
        assert_eq!(slices[3].1.len(), 0); // 61+

        let total: usize = slices.iter().map(|(_, users)| users.len()).sum();
        assert!(total < population.len());
    }

    #[test]
    fn test_first_matching_bracket_wins_on_overlap() {
        let overlapping = vec![
            AgeBracket::new("young", 0, 30),
            AgeBracket::new("also-young", 20, 40),
        ];
        let population = vec![user(&[("age", serde_json::json!(25))])];
        let dim = CategoryDimension::bucketed("age", overlapping).unwrap();
        let slices = slice_population(&population, &dim);
        assert_eq!(slices[0].1.len(), 1);
        assert_eq!(slices[1].1.len(), 0);
    }

    #[test]
    fn test_non_numeric_age_excluded_from_brackets() {
        let population = vec![user(&[("age", serde_json::json!("thirty"))])];
        let dim = CategoryDimension::bucketed("age", age_brackets()).unwrap();
        let slices = slice_population(&population, &dim);
        assert!(slices.iter().all(|(_, users)| users.is_empty()));
    }
}
