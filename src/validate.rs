//! Input grammars for subdomain labels and IPv4 literals.
//!
//! Both grammars are ASCII only. The IPv4 grammar is loose: it only checks for four dot separated
//! groups of one to three digits `0-9`, so values such as `999.999.999.999` pass and are left for
//! the DNS provider to accept or reject.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LABEL: Regex = Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").unwrap();
    static ref IPV4_LITERAL: Regex = Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").unwrap();
}

/// Returns true iff `s` is a single lowercase DNS label of 1 to 63 characters with hyphens only
/// in interior positions.
#[must_use]
pub fn validate_subdomain(s: &str) -> bool {
    LABEL.is_match(s)
}

/// Returns true iff `s` looks like a dotted quad. Octet values are not range checked.
#[must_use]
pub fn validate_ipv4_literal(s: &str) -> bool {
    IPV4_LITERAL.is_match(s)
}

/// Returns true iff `s` is one or more dot separated labels that each pass
/// [`validate_subdomain`].
#[must_use]
pub fn validate_domain(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(validate_subdomain)
}

/// Trim surrounding whitespace and lowercase user supplied label input.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_valid_labels() {
        for label in ["a", "0", "app", "my-app", "a1-b2-c3", "x--y", &"a".repeat(63)] {
            assert!(validate_subdomain(label), "{label:?} should be valid");
        }
    }

    #[test]
    fn rejects_invalid_labels() {
        let too_long = "a".repeat(64);
        for label in [
            "",
            "MyApp",
            "my_app",
            "-app",
            "app-",
            "-",
            "app.dev",
            " app",
            "app ",
            "ap p",
            too_long.as_str(),
        ] {
            assert!(!validate_subdomain(label), "{label:?} should be invalid");
        }
    }

    #[test]
    fn ipv4_literal_is_loose() {
        for ip in ["35.1.2.3", "0.0.0.0", "999.999.999.999", "1.22.333.4"] {
            assert!(validate_ipv4_literal(ip), "{ip:?} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_ipv4_literals() {
        for ip in [
            "",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.a",
            "1234.1.1.1",
            "1.2.3.4 ",
            "1..2.3",
            "::1",
            "a.b.c.d",
            "\u{661}.\u{662}.\u{663}.\u{664}",
            "\u{661}\u{662}\u{663}.1.1.1",
            "\u{ff11}.\u{ff12}.\u{ff13}.\u{ff14}",
            "1.2.3.\u{96a}",
        ] {
            assert!(!validate_ipv4_literal(ip), "{ip:?} should be invalid");
        }
    }

    #[test]
    fn normalizes_before_validation() {
        let label = normalize_label("  MyApp\n");
        assert_eq!(label, "myapp");
        assert!(validate_subdomain(&label));
    }

    #[test]
    fn domains() {
        assert!(validate_domain("sher.dev"));
        assert!(validate_domain("a.b.example"));
        assert!(!validate_domain(""));
        assert!(!validate_domain("Sher.dev"));
        assert!(!validate_domain(".dev"));
        assert!(!validate_domain("sher..dev"));
        assert!(!validate_domain("sher.dev."));
    }

    proptest! {
        #[test]
        fn generated_labels_are_accepted(label in "[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?") {
            prop_assert!(validate_subdomain(&label));
            prop_assert!(validate_subdomain(&normalize_label(&label.to_uppercase())));
        }

        #[test]
        fn overlong_labels_are_rejected(label in "[a-z0-9]{64,100}") {
            prop_assert!(!validate_subdomain(&label));
        }

        #[test]
        fn edge_hyphens_are_rejected(
            leading in "-[a-z0-9-]{0,62}",
            trailing in "[a-z0-9-]{0,62}-",
        ) {
            prop_assert!(!validate_subdomain(&leading));
            prop_assert!(!validate_subdomain(&trailing));
        }

        #[test]
        fn underscores_and_uppercase_are_rejected(
            underscored in "[a-z0-9-]{0,30}_[a-z0-9-]{0,30}",
            upper in "[a-z0-9-]{0,30}[A-Z][a-z0-9-]{0,30}",
        ) {
            prop_assert!(!validate_subdomain(&underscored));
            prop_assert!(!validate_subdomain(&upper));
        }

        #[test]
        fn dotted_quads_are_accepted(ip in "[0-9]{1,3}(\\.[0-9]{1,3}){3}") {
            prop_assert!(validate_ipv4_literal(&ip));
        }

        #[test]
        fn wrong_group_counts_are_rejected(
            three in "[0-9]{1,3}(\\.[0-9]{1,3}){2}",
            five in "[0-9]{1,3}(\\.[0-9]{1,3}){4}",
        ) {
            prop_assert!(!validate_ipv4_literal(&three));
            prop_assert!(!validate_ipv4_literal(&five));
        }

        #[test]
        fn non_digit_groups_are_rejected(
            groups in prop::collection::vec("[0-9]{1,3}", 4),
            bad in "[0-9]{0,2}[^0-9.][0-9]{0,2}",
            at in 0usize..4,
        ) {
            let mut groups = groups;
            groups[at] = bad;
            prop_assert!(!validate_ipv4_literal(&groups.join(".")));
        }
    }
}
