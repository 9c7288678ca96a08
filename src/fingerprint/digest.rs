#[cfg(test)]
use mockall::automock;

use sha2::Digest;
use sha2::Sha256;

use crate::ConfigSnapshot;

/// Content digest over a configuration payload.
///
/// Deterministic: equal snapshots always produce equal fingerprints, so
/// drift detection never needs to compare full payloads.
#[cfg_attr(test, automock)]
pub trait Fingerprint: Send + Sync + 'static {
    fn compute(
        &self,
        snapshot: &ConfigSnapshot,
    ) -> String;
}

/// SHA-256 over the canonical JSON rendering, hex-encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Fingerprint;

impl Fingerprint for Sha256Fingerprint {
    fn compute(
        &self,
        snapshot: &ConfigSnapshot,
    ) -> String {
        // Struct-ordered JSON keeps the digest stable across processes.
        let canonical = serde_json::to_vec(snapshot).expect("config snapshot always serializes");
        hex::encode(Sha256::digest(&canonical))
    }
}
