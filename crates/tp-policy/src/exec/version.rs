//! Provider version compliance executor

use crate::error::Result;
use crate::model::{Outcome, VersionPolicyParams, VersionStrategy};
use std::collections::BTreeMap;
use tp_version::Version;

/// Evaluate a `version_policy` rule against the currently declared provider
/// versions. Never mutates state and never remediates.
pub fn execute_version_policy(
    params: &VersionPolicyParams,
    current: &BTreeMap<String, Version>,
) -> Result<Outcome> {
    let targets = params
        .value
        .iter()
        .map(Version::parse)
        .collect::<tp_version::Result<Vec<_>>>()?;

    tracing::debug!(provider = %params.provider, ?targets, "evaluating version policy");

    let outcome = match params.strategy {
        VersionStrategy::Exclude => {
            // Patch is intentionally ignored: excluding `2.3` bans the
            // whole 2.3.x line.
            if matches(current, &params.provider, &targets, |cur, target| {
                cur.same_minor_line(target)
            }) {
                Outcome::fail("Excluded version matched")
            } else {
                Outcome::Success
            }
        }
        VersionStrategy::MinimumVersion => {
            // Non-strict <= on both components: a provider at exactly the
            // stated minimum still fails. Kept verbatim from the original
            // rule semantics, pending product sign-off.
            if matches(current, &params.provider, &targets, |cur, target| {
                cur.major <= target.major && cur.minor <= target.minor
            }) {
                Outcome::fail("Minimum provider version not met")
            } else {
                Outcome::Success
            }
        }
        VersionStrategy::Unknown => Outcome::fail("Unknown strategy"),
    };

    Ok(outcome)
}

fn matches(
    current: &BTreeMap<String, Version>,
    provider: &str,
    targets: &[Version],
    matching: impl Fn(&Version, &Version) -> bool,
) -> bool {
    let Some(declared) = current.get(provider) else {
        return false;
    };
    targets.iter().any(|target| matching(declared, target))
}
