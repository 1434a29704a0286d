//! Property-based tests for validator chains.

use jsonclass::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// VACUOUS PASS: bound and format rules accept absence
// ============================================================================

proptest! {
    #[test]
    fn bounds_pass_absent_value(min in -1.0e6f64..1.0e6, max in -1.0e6f64..1.0e6, len in 0usize..50) {
        let chain = types()
            .min(min)
            .max(max)
            .min_length(len)
            .max_length(len)
            .str()
            .int()
            .float()
            .bool();
        prop_assert_eq!(chain.validate_value(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn min_fails_iff_below_bound(n in any::<i32>(), min in any::<i32>()) {
        let result = types().min(f64::from(min)).validate_value(json!(n));
        prop_assert_eq!(result.is_ok(), n >= min);
    }
}

// ============================================================================
// IDEMPOTENCY: a validated value validates to itself
// ============================================================================

proptest! {
    #[test]
    fn transform_chain_is_idempotent(s in "[ a-zA-Z]{0,40}") {
        let chain = types().str().trim().to_lower();
        let once = chain.validate_value(json!(s)).unwrap();
        let twice = chain.validate_value(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn float_coercion_is_idempotent(n in any::<i64>()) {
        let chain = types().float();
        let once = chain.validate_value(json!(n)).unwrap();
        let twice = chain.validate_value(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn list_failures_are_addressed_by_index(items in prop::collection::vec(any::<i16>(), 0..20)) {
        let result = types().listof(types().min(0.0)).validate_value(json!(items));
        let expected: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, n)| **n < 0)
            .map(|(i, _)| i.to_string())
            .collect();
        match result {
            Ok(_) => prop_assert!(expected.is_empty()),
            Err(err) => {
                let keypaths: Vec<String> = err
                    .keypath_messages()
                    .unwrap()
                    .keypaths()
                    .map(str::to_owned)
                    .collect();
                prop_assert_eq!(keypaths, expected);
            }
        }
    }
}
