use serde::Serialize;

/// Placeholder interpolated for any release input that was not provided
pub const MISSING_VALUE: &str = "(not provided)";

/// Release inputs captured once at startup.
/// Every field is plain text exactly as the pipeline handed it over.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    pub commits: String,
    pub repository: String,
    pub release_name: String,
    pub version: String,
}

impl ReleaseContext {
    pub fn new(commits: String, repository: String, release_name: String, version: String) -> Self {
        Self {
            commits,
            repository,
            release_name,
            version,
        }
    }

    /// Build from optional values, substituting [`MISSING_VALUE`] for absent ones
    pub fn from_parts(
        commits: Option<String>,
        repository: Option<String>,
        release_name: Option<String>,
        version: Option<String>,
    ) -> Self {
        let or_missing = |value: Option<String>| value.unwrap_or_else(|| MISSING_VALUE.to_string());
        Self::new(
            or_missing(commits),
            or_missing(repository),
            or_missing(release_name),
            or_missing(version),
        )
    }

    /// Names of the fields that fell back to the placeholder
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("commits", &self.commits),
            ("repository", &self.repository),
            ("release_name", &self.release_name),
            ("version", &self.version),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_str() == MISSING_VALUE)
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_fills_placeholders() {
        let context = ReleaseContext::from_parts(
            Some("fix: bug".to_string()),
            None,
            None,
            Some("1.2.0".to_string()),
        );

        assert_eq!(context.commits, "fix: bug");
        assert_eq!(context.repository, MISSING_VALUE);
        assert_eq!(context.version, "1.2.0");
        assert_eq!(context.missing_fields(), vec!["repository", "release_name"]);
    }
}
