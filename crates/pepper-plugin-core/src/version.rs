//! Version repair for the legacy multimedia plugin.
//!
//! The version switch is free-form text supplied at launch. Instead of
//! rejecting bad input it is padded out to four components so the plugin
//! still gets a usable version and description.
//! The result always has exactly four components.

use std::fmt;

const DEFAULT_COMPONENTS: [&str; 4] = ["11", "2", "999", "999"];

/// A dot-separated version with exactly four components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyVersion {
    components: Vec<String>,
}

impl LegacyVersion {
    /// Split `raw` on `.` and repair it to four components.
    ///
    /// A missing or empty first component becomes `11`; the remaining
    /// missing components default to `2`, `999` and `999`. Components past
    /// the fourth are dropped.
    pub fn normalize(raw: &str) -> Self {
        let mut components: Vec<String> = raw.split('.').map(str::to_string).collect();

        match components.first_mut() {
            Some(first) if first.is_empty() => *first = DEFAULT_COMPONENTS[0].to_string(),
            Some(_) => {}
            None => components.push(DEFAULT_COMPONENTS[0].to_string()),
        }

        for default in &DEFAULT_COMPONENTS[components.len().min(4)..] {
            components.push(default.to_string());
        }
        components.truncate(4);

        Self { components }
    }

    pub fn major(&self) -> &str {
        &self.components[0]
    }

    pub fn minor(&self) -> &str {
        &self.components[1]
    }

    pub fn build(&self) -> &str {
        &self.components[2]
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// `"<major>.<minor> r<build>"`, e.g. `"10.2 r154"`.
    pub fn description_suffix(&self) -> String {
        format!("{}.{} r{}", self.major(), self.minor(), self.build())
    }
}

impl fmt::Display for LegacyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.components.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_version_gets_defaults() {
        assert_eq!(LegacyVersion::normalize("").to_string(), "11.2.999.999");
    }

    #[test]
    fn test_partial_versions_are_padded() {
        assert_eq!(LegacyVersion::normalize("7").to_string(), "7.2.999.999");
        assert_eq!(LegacyVersion::normalize("7.5").to_string(), "7.5.999.999");
        assert_eq!(LegacyVersion::normalize("7.5.1").to_string(), "7.5.1.999");
    }

    #[test]
    fn test_empty_major_is_replaced() {
        assert_eq!(LegacyVersion::normalize(".4").to_string(), "11.4.999.999");
    }

    #[test]
    fn test_full_version_untouched() {
        assert_eq!(
            LegacyVersion::normalize("19.0.0.185").to_string(),
            "19.0.0.185"
        );
    }

    #[test]
    fn test_long_version_truncated() {
        let version = LegacyVersion::normalize("1.2.3.4.5");
        assert_eq!(version.components().len(), 4);
        assert_eq!(version.to_string(), "1.2.3.4");
        assert_eq!(LegacyVersion::normalize("..").to_string(), "11...999");
    }

    #[test]
    fn test_description_suffix() {
        let version = LegacyVersion::normalize("10.2.154.999");
        assert_eq!(version.description_suffix(), "10.2 r154");
    }
}
