//! Fill pipeline: issue keys from the sheet, accounts from the APIs,
//! matched pairs back into the sheet

pub mod assemble;
pub mod excel;

use std::collections::HashSet;

pub use assemble::{AccountIndex, assemble_account_index};
pub use excel::{RowError, RowOutcome};

/// Split row outcomes into the readable keys and the per-row errors,
/// both in sheet order
pub fn partition_outcomes(outcomes: Vec<RowOutcome>) -> (Vec<String>, Vec<RowError>) {
    let mut keys = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(key) => keys.push(key),
            Err(error) => errors.push(error),
        }
    }
    (keys, errors)
}

/// Drop repeated keys, keeping the first occurrence of each
pub fn dedupe_keys(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|key| seen.insert(key.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_partition_outcomes_keeps_order() {
        let outcomes = vec![
            Ok("PROJ-1".to_string()),
            Err(RowError {
                row: 3,
                message: "bad cell".to_string(),
            }),
            Ok("PROJ-2".to_string()),
        ];

        let (ok, errors) = partition_outcomes(outcomes);
        assert_eq!(ok, keys(&["PROJ-1", "PROJ-2"]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 3);
    }

    #[test]
    fn test_dedupe_keys_keeps_first_occurrence() {
        let deduped = dedupe_keys(keys(&["A", "B", "A", "C", "B"]));
        assert_eq!(deduped, keys(&["A", "B", "C"]));
    }

    #[test]
    fn test_dedupe_keys_empty() {
        assert!(dedupe_keys(Vec::new()).is_empty());
    }
}
