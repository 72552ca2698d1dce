use std::collections::BTreeSet;
use std::fmt;

/// Set of OAuth2 scopes.
///
/// Scopes are opaque strings; authorization is a subset test of the required
/// set against the granted set. Iteration order is lexical so that rendered
/// challenges and serialized claims are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space-delimited scope string (RFC 6749 §3.3).
    ///
    /// Repeated and surrounding whitespace is ignored.
    pub fn parse(scopes: &str) -> Self {
        scopes.split_whitespace().collect()
    }

    pub fn insert(&mut self, scope: impl Into<String>) {
        self.0.insert(scope.into());
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// First scope of `self` that `granted` does not contain.
    pub fn first_missing<'a>(&'a self, granted: &ScopeSet) -> Option<&'a str> {
        self.iter().find(|scope| !granted.contains(scope))
    }

    /// True when every scope in `self` is present in `granted`.
    pub fn is_satisfied_by(&self, granted: &ScopeSet) -> bool {
        self.first_missing(granted).is_none()
    }

    pub fn intersection(&self, other: &ScopeSet) -> ScopeSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Value for a `WWW-Authenticate` header demanding these scopes.
    ///
    /// `Bearer` when no scope is required, otherwise `Bearer scope="a b"`.
    pub fn challenge(&self) -> String {
        if self.is_empty() {
            "Bearer".to_string()
        } else {
            format!("Bearer scope=\"{}\"", self)
        }
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for scope in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(scope)?;
            first = false;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_delimited() {
        let scopes = ScopeSet::parse("order_read  order_write product_read ");

        assert_eq!(scopes.len(), 3);
        assert!(scopes.contains("order_read"));
        assert!(scopes.contains("order_write"));
        assert!(scopes.contains("product_read"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(ScopeSet::parse("   ").is_empty());
    }

    #[test]
    fn test_subset_semantics() {
        let granted = ScopeSet::parse("order_read product_read");

        assert!(ScopeSet::new().is_satisfied_by(&granted));
        assert!(ScopeSet::parse("order_read").is_satisfied_by(&granted));
        assert!(ScopeSet::parse("product_read order_read").is_satisfied_by(&granted));
        assert!(!ScopeSet::parse("order_read me").is_satisfied_by(&granted));
    }

    #[test]
    fn test_first_missing() {
        let granted = ScopeSet::parse("order_read");
        let required = ScopeSet::parse("me order_read order_write");

        assert_eq!(required.first_missing(&granted), Some("me"));
    }

    #[test]
    fn test_superset_of_denied_is_denied() {
        let granted = ScopeSet::parse("order_read product_read");
        let denied = ScopeSet::parse("me");
        assert!(!denied.is_satisfied_by(&granted));

        for extra in ["order_read", "product_read", "order_write"] {
            let mut superset = denied.clone();
            superset.insert(extra);
            assert!(!superset.is_satisfied_by(&granted));
        }
    }

    #[test]
    fn test_intersection() {
        let stored = ScopeSet::parse("order_read order_write me");
        let requested = ScopeSet::parse("me product_write");

        assert_eq!(stored.intersection(&requested), ScopeSet::parse("me"));
    }

    #[test]
    fn test_challenge() {
        assert_eq!(ScopeSet::new().challenge(), "Bearer");
        assert_eq!(
            ScopeSet::parse("product_write me").challenge(),
            "Bearer scope=\"me product_write\""
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let scopes = ScopeSet::parse("order_read order_write product_read product_write me");
        assert_eq!(ScopeSet::parse(&scopes.to_string()), scopes);
    }
}
