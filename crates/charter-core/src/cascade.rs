//! Tiered ref-name matching
//!
//! Tag refs rarely follow one convention across a whole project history, so
//! matching runs as a cascade of five tag shapes, from full semver down to a
//! bare integer. The resolver decides when to fall through a tier; this module
//! only answers "does this one ref match this one tier, and as what".

use regex::Regex;

use crate::error::{CoreError, Result};
use crate::version::Version;

/// One matching strategy in the fallback sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeTier {
    /// `major.minor.patch` with optional prefix and suffix
    Semver,
    /// `NNNN-NN-NN` date tags mapped onto major.minor.patch
    Date,
    /// `major.minor` with the patch synthesized as 0
    HalfSemver,
    /// `<name>-ls<N>` build-revision tags
    Revision,
    /// a lone integer
    BareNumber,
}

impl CascadeTier {
    /// Tiers in the order the resolver tries them
    pub const ALL: [CascadeTier; 5] = [
        CascadeTier::Semver,
        CascadeTier::Date,
        CascadeTier::HalfSemver,
        CascadeTier::Revision,
        CascadeTier::BareNumber,
    ];
}

/// The five compiled patterns of the cascade
///
/// Built once and passed by reference into resolution, so matching carries no
/// hidden setup-order dependency.
#[derive(Debug)]
pub struct CascadePatterns {
    semver: Regex,
    date: Regex,
    half_semver: Regex,
    revision: Regex,
    bare_number: Regex,
}

impl Default for CascadePatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadePatterns {
    pub fn new() -> Self {
        // The patterns are fixed strings and always compile.
        Self {
            semver: Regex::new(r"^refs/tags/(.*?\D)?(\d+\.\d+\.\d+)(\.?-?)(.*)$").unwrap(),
            date: Regex::new(r"^refs/tags/(.*?\D)?(\d+-\d+-\d+)(\.?-?)(.*)$").unwrap(),
            half_semver: Regex::new(r"^refs/tags/(.*?\D)?(\d+\.\d+)(\.?-?)(.*)$").unwrap(),
            revision: Regex::new(r"^refs/tags/(.*)-ls(\d+)$").unwrap(),
            bare_number: Regex::new(r"^refs/tags/(\d+)$").unwrap(),
        }
    }

    /// Match one ref against one tier
    ///
    /// `Ok(None)` means the ref does not have this tier's shape. A ref that
    /// has the shape but cannot be turned into a semantic version even after
    /// dropping its suffix is a hard error carrying the offending ref.
    pub fn match_ref(&self, tier: CascadeTier, ref_name: &str) -> Result<Option<(String, Version)>> {
        match tier {
            CascadeTier::Semver => self.match_affixed(
                &self.semver,
                ref_name,
                |core| core.to_string(),
                |prefix, _| prefix.to_string(),
            ),
            CascadeTier::Date => self.match_affixed(
                &self.date,
                ref_name,
                normalize_date,
                |_, core| core.to_string(),
            ),
            CascadeTier::HalfSemver => self.match_affixed(
                &self.half_semver,
                ref_name,
                |core| format!("{core}.0"),
                |_, core| format!("{core}.0"),
            ),
            CascadeTier::Revision => self.match_revision(ref_name),
            CascadeTier::BareNumber => self.match_bare_number(ref_name),
        }
    }

    /// Shared handling for the prefix/core/separator/suffix tiers
    ///
    /// `to_semver_core` turns the matched numeric core into a `X.Y.Z` string;
    /// `track_of(prefix, core)` derives the grouping key, which differs per
    /// tier (the prefix for full semver, the matched numeric string for the
    /// date and half-semver tiers).
    fn match_affixed(
        &self,
        pattern: &Regex,
        ref_name: &str,
        to_semver_core: impl Fn(&str) -> String,
        track_of: impl Fn(&str, &str) -> String,
    ) -> Result<Option<(String, Version)>> {
        let Some(caps) = pattern.captures(ref_name) else {
            return Ok(None);
        };

        let prefix = caps.get(1).map_or("", |m| m.as_str());
        let core = &caps[2];
        let separator = &caps[3];
        let suffix = &caps[4];

        let semver = parse_with_fallback(&to_semver_core(core), suffix, ref_name)?;
        let raw = format!("{prefix}{core}{separator}{suffix}");

        Ok(Some((track_of(prefix, core), Version::new(semver, raw))))
    }

    fn match_revision(&self, ref_name: &str) -> Result<Option<(String, Version)>> {
        let Some(caps) = self.revision.captures(ref_name) else {
            return Ok(None);
        };

        let name = &caps[1];
        let revision = &caps[2];

        let core = format!("{revision}.0.0");
        let semver = parse_with_fallback(&core, name, ref_name)?;

        Ok(Some((
            core,
            Version::new(semver, format!("{name}-ls{revision}")),
        )))
    }

    fn match_bare_number(&self, ref_name: &str) -> Result<Option<(String, Version)>> {
        let Some(caps) = self.bare_number.captures(ref_name) else {
            return Ok(None);
        };

        let number = &caps[1];
        let core = format!("{number}.0.0");
        let semver = semver::Version::parse(&core).map_err(|source| CoreError::VersionParse {
            reference: ref_name.to_string(),
            source,
        })?;

        Ok(Some((core, Version::new(semver, number.to_string()))))
    }
}

/// Parse `<core>-<suffix>`, degrading to the bare core when the suffix is not
/// valid pre-release syntax
fn parse_with_fallback(core: &str, suffix: &str, reference: &str) -> Result<semver::Version> {
    if !suffix.is_empty() {
        if let Ok(v) = semver::Version::parse(&format!("{core}-{suffix}")) {
            return Ok(v);
        }
    }
    semver::Version::parse(core).map_err(|source| CoreError::VersionParse {
        reference: reference.to_string(),
        source,
    })
}

/// Map a `NNNN-NN-NN` date onto major.minor.patch slots
///
/// Zero-padded components would be rejected as semver integers, so each
/// component is stripped of leading zeros. The track key keeps the original
/// spelling.
fn normalize_date(date: &str) -> String {
    date.split('-')
        .map(|component| {
            let stripped = component.trim_start_matches('0');
            if stripped.is_empty() { "0" } else { stripped }
        })
        .collect::<Vec<_>>()
        .join(".")
}
