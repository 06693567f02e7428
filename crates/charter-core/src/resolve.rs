//! Version resolution over a whole ref set

use tracing::{debug, warn};

use crate::cascade::{CascadePatterns, CascadeTier};
use crate::error::Result;
use crate::version::{VersionList, VersionMap};

/// Resolve a set of tag refs to one latest version per release track
///
/// The cascade is global: a tier is tried across the entire ref set, and the
/// next tier is attempted only when the current one matched nothing at all.
/// Once a tier has matched anywhere, refs that tier cannot parse are dropped,
/// even if a later tier would have accepted them. Downstream consumers depend
/// on this coarse behavior; do not turn it into per-ref fallback.
///
/// An empty list is the soft-failure result for a ref set no tier understands.
/// Refs that merely look like a tier but fail both semver parse attempts are
/// a hard error instead.
pub fn resolve_versions(patterns: &CascadePatterns, refs: &[String]) -> Result<VersionList> {
    let mut version_map = VersionMap::new();

    for tier in CascadeTier::ALL {
        for ref_name in refs {
            if let Some((track, version)) = patterns.match_ref(tier, ref_name)? {
                version_map.insert(track, version);
            }
        }

        if !version_map.is_empty() {
            debug!(?tier, tracks = version_map.len(), "cascade tier matched");
            break;
        }
    }

    if version_map.is_empty() {
        let unmatched: Vec<&str> = refs
            .iter()
            .filter(|r| r.starts_with("refs/tags/"))
            .map(String::as_str)
            .collect();
        warn!(?unmatched, "could not parse any ref as a version");
        return Ok(Vec::new());
    }

    Ok(version_map.reduce())
}
