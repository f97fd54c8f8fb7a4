//! Classification of Contrast rule ids to CWE weakness ids.

/// Outcome of classifying a rule id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A tracked weakness class.
    Cwe(u32),
    /// Known rule the benchmark deliberately does not track.
    Ignored,
    /// Rule id missing from the table entirely.
    Unknown,
}

/// Classify a Contrast rule id. Pure lookup, no diagnostics.
pub fn classify(rule: &str) -> Classification {
    use Classification::{Cwe, Ignored, Unknown};

    match rule {
        "cmd-injection" => Cwe(78),
        "cookie-flags-missing" => Cwe(614),
        "crypto-bad-ciphers" => Cwe(327),
        "crypto-bad-mac" => Cwe(328),
        "crypto-weak-randomness" => Cwe(330),
        "csp-header-insecure" => Ignored,
        "csp-header-missing" => Ignored,
        "header-injection" => Cwe(113),
        "hql-injection" => Cwe(564),
        "hsts-header-missing" => Cwe(319),
        "ldap-injection" => Cwe(90),
        "path-traversal" => Cwe(22),
        "reflected-xss" => Cwe(79),
        "reflection-injection" => Ignored,
        "redos" => Cwe(400),
        "sql-injection" => Cwe(89),
        "trust-boundary-violation" => Cwe(501),
        "unsafe-readline" => Ignored,
        "xcontenttype-header-missing" => Ignored,
        "xpath-injection" => Cwe(643),
        "xxe" => Cwe(611),
        _ => Unknown,
    }
}

/// Resolve a rule id to its numeric CWE, `0` for anything untracked.
///
/// Deliberately ignored rules resolve silently; a rule id absent from
/// the table is logged as a warning before falling through to `0`.
pub fn cwe_lookup(rule: &str) -> u32 {
    match classify(rule) {
        Classification::Cwe(id) => id,
        Classification::Ignored => 0,
        Classification::Unknown => {
            tracing::warn!(rule, "unrecognized Contrast finding type");
            0
        }
    }
}
