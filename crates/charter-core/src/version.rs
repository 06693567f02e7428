//! Version types and the per-track reduction step

use indexmap::IndexMap;
use serde::Serialize;

/// A single resolved version of an image
///
/// `semver` drives all ordering decisions. `raw` keeps the tag exactly as it
/// appeared in the ref so artifacts pinned to that tag can be fetched again.
#[derive(Debug, Clone, Serialize)]
pub struct Version {
    pub semver: semver::Version,
    pub raw: String,
}

impl Version {
    pub fn new(semver: semver::Version, raw: impl Into<String>) -> Self {
        Self {
            semver,
            raw: raw.into(),
        }
    }

    /// The `major.minor.patch` form exposed to chart templates
    pub fn core_string(&self) -> String {
        format!(
            "{}.{}.{}",
            self.semver.major, self.semver.minor, self.semver.patch
        )
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.semver == other.semver
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.semver.cmp(&other.semver)
    }
}

/// Versions ordered ascending by semver
pub type VersionList = Vec<Version>;

/// Versions grouped by release track
///
/// A track is the grouping key one cascade tier derived for a tag: the
/// non-numeric tag prefix, or the matched numeric string when there is none.
/// All versions in one map come from the same cascade tier.
#[derive(Debug, Default)]
pub struct VersionMap(IndexMap<String, Vec<Version>>);

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, track: String, version: Version) {
        self.0.entry(track).or_default().push(version);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Collapse each track to its maximum version and order the result
    ///
    /// Map iteration order never reaches the caller; the returned list is
    /// ordered by the final explicit sort alone.
    pub fn reduce(self) -> VersionList {
        let mut out: VersionList = self
            .0
            .into_values()
            .filter_map(|mut versions| {
                versions.sort();
                versions.pop()
            })
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> Version {
        Version::new(semver::Version::parse(s).unwrap(), s)
    }

    #[test]
    fn test_reduce_keeps_track_maximum() {
        let mut map = VersionMap::new();
        map.insert("".to_string(), version("1.2.3"));
        map.insert("".to_string(), version("1.3.0"));
        map.insert("".to_string(), version("1.2.9"));

        let reduced = map.reduce();
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].raw, "1.3.0");
    }

    #[test]
    fn test_reduce_orders_across_tracks() {
        let mut map = VersionMap::new();
        map.insert("b".to_string(), version("2.0.0"));
        map.insert("a".to_string(), version("1.0.0"));
        map.insert("c".to_string(), version("1.5.0"));

        let reduced = map.reduce();
        let cores: Vec<String> = reduced.iter().map(Version::core_string).collect();
        assert_eq!(cores, vec!["1.0.0", "1.5.0", "2.0.0"]);

        // Non-decreasing by construction
        for pair in reduced.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_ordering_ignores_raw() {
        let a = Version::new(semver::Version::parse("1.0.0").unwrap(), "v1.0.0");
        let b = Version::new(semver::Version::parse("1.0.0").unwrap(), "release-1.0.0");
        assert_eq!(a, b);
    }

    #[test]
    fn test_core_string_drops_prerelease() {
        let v = Version::new(semver::Version::parse("142.0.0-my-app").unwrap(), "my-app-ls142");
        assert_eq!(v.core_string(), "142.0.0");
    }
}
