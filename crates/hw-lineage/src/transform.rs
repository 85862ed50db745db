//! Column name normalization

use hw_core::ColumnTransform;

/// Apply every transform rule in order.
///
/// Each rule strips its prefix, then its suffix, when they are set and
/// present. A rule's `target_pattern` does not gate it.
pub(crate) fn transform_column_name(name: &str, transforms: &[ColumnTransform]) -> String {
    let mut result = name;
    for transform in transforms {
        if !transform.strip_prefix.is_empty() {
            result = result
                .strip_prefix(transform.strip_prefix.as_str())
                .unwrap_or(result);
        }
        if !transform.strip_suffix.is_empty() {
            result = result
                .strip_suffix(transform.strip_suffix.as_str())
                .unwrap_or(result);
        }
    }
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(prefix: &str, suffix: &str) -> ColumnTransform {
        ColumnTransform {
            target_pattern: None,
            strip_prefix: prefix.to_string(),
            strip_suffix: suffix.to_string(),
        }
    }

    #[test]
    fn test_strip_prefix() {
        let rules = [rule("rxtxmsg.payload.", "")];
        assert_eq!(
            transform_column_name("rxtxmsg.payload.user_id", &rules),
            "user_id"
        );
        assert_eq!(transform_column_name("user_id", &rules), "user_id");
    }

    #[test]
    fn test_rules_accumulate_in_order() {
        let rules = [rule("raw_", "_v2"), rule("src_", "")];
        assert_eq!(transform_column_name("raw_src_amount_v2", &rules), "amount");
        // The second rule only sees what the first left behind
        assert_eq!(transform_column_name("src_raw_amount", &rules), "raw_amount");
    }

    #[test]
    fn test_target_pattern_is_ignored() {
        let mut r = rule("x_", "");
        r.target_pattern = Some("nothing.matches.this".into());
        assert_eq!(transform_column_name("x_col", &[r]), "col");
    }

    #[test]
    fn test_no_rules() {
        assert_eq!(transform_column_name("col", &[]), "col");
    }
}
