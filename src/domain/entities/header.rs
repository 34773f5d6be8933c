use std::collections::{HashMap, HashSet};

/// Allow-list of source headers plus the source → display rename map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSpec {
    allowed: HashSet<String>,
    mapping: HashMap<String, String>,
}

impl HeaderSpec {
    pub fn new<A, M, S, T, U>(allowed: A, mapping: M) -> Self
    where
        A: IntoIterator<Item = S>,
        M: IntoIterator<Item = (T, U)>,
        S: Into<String>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            mapping: mapping
                .into_iter()
                .map(|(source, display)| (source.into(), display.into()))
                .collect(),
        }
    }

    /// Membership is always checked against the source header name.
    pub fn allows(&self, source: &str) -> bool {
        self.allowed.contains(source)
    }

    pub fn display_name<'a>(&'a self, source: &'a str) -> &'a str {
        self.mapping
            .get(source)
            .map(String::as_str)
            .unwrap_or(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_headers_keep_their_name() {
        let spec = HeaderSpec::new(["a", "b"], [("a", "Alpha")]);
        assert_eq!(spec.display_name("a"), "Alpha");
        assert_eq!(spec.display_name("b"), "b");
    }

    #[test]
    fn allow_list_ignores_display_names() {
        let spec = HeaderSpec::new(["a"], [("a", "Alpha")]);
        assert!(spec.allows("a"));
        assert!(!spec.allows("Alpha"));
    }
}
