use lazy_static::lazy_static;
use regex::Regex;

/// Exact-match public providers, allowed so the product can be demoed without
/// a campus address. Kept deliberately; confirm before a non-demo rollout.
const DEMO_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "outlook.com", "hotmail.com"];

/// Educational-address patterns matched against the full lowercased address:
/// TLD suffixes plus known institution name fragments.
const EDU_PATTERNS: &[&str] = &[
    r"\.edu$",
    r"\.edu\.\w+$",
    r"\.ac\.\w+$",
    r"@iit\w*\.",
    r"@nit\w*\.",
    r"@bits-pilani\.",
    r"@vit\.",
    r"@manipal\.",
    r"@amity\.",
    r"@srm\.",
    r"@iisc\.",
    r"@iiit\w*\.",
    r"\.college$",
    r"\.university$",
];

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref EDU_RES: Vec<Regex> = EDU_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Registration eligibility: demo allow-list first, then the educational
/// patterns, in that order.
pub fn is_eligible_email(email: &str) -> bool {
    let email = email.to_lowercase();
    let domain = email.rsplit('@').next().unwrap_or("");
    if DEMO_DOMAINS.contains(&domain) {
        return true;
    }
    EDU_RES.iter().any(|re| re.is_match(&email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_domains_allowed() {
        assert!(is_eligible_email("someone@gmail.com"));
        assert!(is_eligible_email("Someone@YAHOO.com"));
        assert!(is_eligible_email("a@outlook.com"));
        assert!(is_eligible_email("a@hotmail.com"));
    }

    #[test]
    fn educational_suffixes_allowed() {
        assert!(is_eligible_email("student@mit.edu"));
        assert!(is_eligible_email("student@unsw.edu.au"));
        assert!(is_eligible_email("alice@iit.ac.in"));
        assert!(is_eligible_email("bob@imperial.ac.uk"));
        assert!(is_eligible_email("x@my.college"));
        assert!(is_eligible_email("x@open.university"));
    }

    #[test]
    fn institution_fragments_allowed() {
        assert!(is_eligible_email("a@iitb.ac.in"));
        assert!(is_eligible_email("a@nitk.edu.in"));
        assert!(is_eligible_email("a@bits-pilani.ac.in"));
        assert!(is_eligible_email("a@vit.ac.in"));
        assert!(is_eligible_email("a@iiitd.ac.in"));
    }

    #[test]
    fn other_domains_rejected() {
        assert!(!is_eligible_email("user@randomcorp.io"));
        assert!(!is_eligible_email("user@example.com"));
        assert!(!is_eligible_email("user@education.io"));
    }

    #[test]
    fn syntax_check() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
    }
}
