//! Tests for environment variable decoding.

use serde_json::{Value, json};

use super::*;

const PREFIX: &str = "rc0_";

fn env(vars: &[(&str, &str)]) -> EnvSnapshot {
    vars.iter().copied().collect()
}

fn decoded(vars: &[(&str, &str)]) -> Value {
    Value::Object(decode(PREFIX, &env(vars)))
}

mod basic {
    use super::*;

    #[test]
    fn values_stay_strings() {
        assert_eq!(decoded(&[("rc0_envOption", "42")]), json!({"envOption": "42"}));
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        assert_eq!(decoded(&[("PATH", "/bin"), ("rc1_x", "y")]), json!({}));
    }

    #[test]
    fn prefix_match_ignores_case() {
        assert_eq!(
            decoded(&[("RC0_test_upperCase", "187")]),
            json!({"test_upperCase": "187"})
        );
    }

    #[test]
    fn prefix_match_ignores_case_beyond_ascii() {
        let vars = env(&[("ÉTÉ_saison", "chaude"), ("été_mois", "juillet")]);
        assert_eq!(
            Value::Object(decode("été_", &vars)),
            json!({"saison": "chaude", "mois": "juillet"})
        );
    }

    #[test]
    fn nested_path() {
        assert_eq!(decoded(&[("rc0_opt__a__b", "c")]), json!({"opt": {"a": {"b": "c"}}}));
    }

    #[test]
    fn prefix_alone_contributes_nothing() {
        assert_eq!(decoded(&[("rc0_", "x"), ("rc0_____", "y")]), json!({}));
    }

    #[test]
    fn short_names_do_not_panic() {
        assert_eq!(decoded(&[("rc", "x"), ("", "y")]), json!({}));
    }
}

mod delimiters {
    use super::*;

    #[test]
    fn trailing_delimiter_is_ignored() {
        assert_eq!(decoded(&[("rc0_someOpt__w__w__", "18629")]), json!({"someOpt": {"w": {"w": "18629"}}}));
    }

    #[test]
    fn leading_delimiter_is_ignored() {
        assert_eq!(decoded(&[("rc0___z__i__", "9999")]), json!({"z": {"i": "9999"}}));
    }
}

mod first_write_wins {
    use super::*;

    #[test]
    fn scalar_blocks_deeper_paths() {
        let result = decoded(&[
            ("rc0_someOpt__a", "42"),
            ("rc0_someOpt__x__", "99"),
            ("rc0_someOpt__a__b", "186"),
            ("rc0_someOpt__a__b__c", "243"),
            ("rc0_someOpt__x__y", "1862"),
            ("rc0_someOpt__z", "186577"),
            ("rc0_someOpt__z__x__", "18629"),
        ]);

        assert_eq!(result, json!({"someOpt": {"a": "42", "x": "99", "z": "186577"}}));
    }

    #[test]
    fn object_is_not_replaced_by_scalar() {
        let result = decoded(&[("rc0_db__host", "h"), ("rc0_db", "flat")]);
        assert_eq!(result, json!({"db": {"host": "h"}}));
    }

    #[test]
    fn repeated_leaf_keeps_first_value() {
        let result = decoded(&[("RC0_level", "debug"), ("rc0_level", "info")]);
        assert_eq!(result, json!({"level": "debug"}));
    }

    #[test]
    fn siblings_merge_under_shared_parent() {
        let result = decoded(&[("rc0_db__host", "h"), ("rc0_db__port", "5432")]);
        assert_eq!(result, json!({"db": {"host": "h", "port": "5432"}}));
    }
}

#[test]
fn snapshot_preserves_order() {
    let snapshot = env(&[("b", "1"), ("a", "2")]);
    assert_eq!(snapshot.iter().collect::<Vec<_>>(), [("b", "1"), ("a", "2")]);
    assert_eq!(snapshot.len(), 2);
    assert!(!snapshot.is_empty());
    assert!(EnvSnapshot::default().is_empty());
}
