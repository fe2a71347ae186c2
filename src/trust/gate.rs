//! trust::gate
//!
//! Decide whether an RPC call may go to the daemon listening on a port.
//!
//! # Per-port state
//!
//! ```text
//! UNKNOWN --observe stable uid--> TRUSTED(uid)   (record appended)
//! TRUSTED(uid) --observe same uid--> allowed
//! TRUSTED(uid) --observe other uid--> blocked    (record untouched)
//! any --observe changing uids--> blocked
//! any --nothing bound--> allowed
//! ```
//!
//! The last transition fails open: a port nobody listens on yet cannot be
//! told apart from one about to be taken over, and calls to it go through.

use super::inspector::{ProcessIdentity, ProcessInspector};
use super::store::TrustStore;
use super::TrustError;

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The operator disabled the gate.
    Bypassed,
    /// Nothing is bound to the port.
    Unobserved,
    /// First contact: `uid` was recorded as trusted.
    Adopted { uid: u32 },
    /// The listener matches the recorded uid.
    Trusted { uid: u32 },
    /// The listener runs as someone other than the recorded uid.
    Mismatch { trusted: u32, observed: u32 },
    /// Real, effective and saved uids disagree.
    Ambiguous { identity: ProcessIdentity },
}

impl GateDecision {
    /// Whether the call may proceed.
    pub fn allows(&self) -> bool {
        !matches!(
            self,
            GateDecision::Mismatch { .. } | GateDecision::Ambiguous { .. }
        )
    }
}

/// The trust gate: a trust store plus a way to observe listeners.
pub struct TrustGate {
    store: TrustStore,
    inspector: Box<dyn ProcessInspector>,
    bypass: bool,
}

impl std::fmt::Debug for TrustGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustGate")
            .field("store", &self.store)
            .field("bypass", &self.bypass)
            .finish_non_exhaustive()
    }
}

impl TrustGate {
    pub fn new(store: TrustStore, inspector: Box<dyn ProcessInspector>, bypass: bool) -> Self {
        Self {
            store,
            inspector,
            bypass,
        }
    }

    /// Check the listener on `port`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be inspected or a new trust
    /// record cannot be appended. Either way the call must not proceed.
    pub fn check(&mut self, port: u16) -> Result<GateDecision, TrustError> {
        if self.bypass {
            return Ok(GateDecision::Bypassed);
        }

        let Some(owner) = self.inspector.owner_of_port(port)? else {
            return Ok(GateDecision::Unobserved);
        };

        let Some(observed) = owner.identity.stable() else {
            return Ok(GateDecision::Ambiguous {
                identity: owner.identity,
            });
        };

        match self.store.trusted(port) {
            None => {
                self.store.record(port, observed)?;
                Ok(GateDecision::Adopted { uid: observed })
            }
            Some(trusted) if trusted == observed => Ok(GateDecision::Trusted { uid: observed }),
            Some(trusted) => Ok(GateDecision::Mismatch { trusted, observed }),
        }
    }

    pub fn store(&self) -> &TrustStore {
        &self.store
    }

    /// Swap in a freshly loaded store (after a datadir change).
    pub fn replace_store(&mut self, store: TrustStore) {
        self.store = store;
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust::inspector::StaticInspector;
    use std::fs;
    use tempfile::TempDir;

    fn gate(dir: &TempDir, inspector: StaticInspector) -> TrustGate {
        let (store, _) = TrustStore::load(dir.path().join("sbtc.uids")).unwrap();
        TrustGate::new(store, Box::new(inspector), false)
    }

    fn lines(dir: &TempDir) -> Vec<String> {
        fs::read_to_string(dir.path().join("sbtc.uids"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn first_observation_is_adopted_once() {
        let dir = TempDir::new().unwrap();
        let mut gate = gate(
            &dir,
            StaticInspector::new().with_owner(8332, ProcessIdentity::uniform(1000)),
        );

        assert_eq!(gate.check(8332).unwrap(), GateDecision::Adopted { uid: 1000 });
        assert_eq!(gate.check(8332).unwrap(), GateDecision::Trusted { uid: 1000 });
        assert_eq!(lines(&dir), vec!["8332:1000"]);
    }

    #[test]
    fn mismatch_blocks_and_preserves_record() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sbtc.uids"), "8332:1000\n").unwrap();
        let mut gate = gate(
            &dir,
            StaticInspector::new().with_owner(8332, ProcessIdentity::uniform(0)),
        );

        let decision = gate.check(8332).unwrap();
        assert_eq!(
            decision,
            GateDecision::Mismatch {
                trusted: 1000,
                observed: 0
            }
        );
        assert!(!decision.allows());
        assert_eq!(lines(&dir), vec!["8332:1000"]);
        assert_eq!(gate.store().trusted(8332), Some(1000));
    }

    #[test]
    fn changing_uids_block_without_recording() {
        let dir = TempDir::new().unwrap();
        let identity = ProcessIdentity {
            real: 1000,
            effective: 0,
            saved: 0,
        };
        let mut gate = gate(&dir, StaticInspector::new().with_owner(8332, identity));

        let decision = gate.check(8332).unwrap();
        assert_eq!(decision, GateDecision::Ambiguous { identity });
        assert!(!decision.allows());
        assert!(lines(&dir).is_empty());
    }

    #[test]
    fn nothing_listening_fails_open() {
        let dir = TempDir::new().unwrap();
        let mut gate = gate(&dir, StaticInspector::new());

        let decision = gate.check(8332).unwrap();
        assert_eq!(decision, GateDecision::Unobserved);
        assert!(decision.allows());
        assert!(lines(&dir).is_empty());
    }

    #[test]
    fn bypass_skips_inspection() {
        let dir = TempDir::new().unwrap();
        let (store, _) = TrustStore::load(dir.path().join("sbtc.uids")).unwrap();
        let mut gate = TrustGate::new(store, Box::new(StaticInspector::failing("denied")), true);

        assert_eq!(gate.check(8332).unwrap(), GateDecision::Bypassed);
        assert!(gate.is_bypassed());
    }

    #[test]
    fn inspection_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut gate = gate(&dir, StaticInspector::failing("permission denied"));
        assert!(matches!(gate.check(8332), Err(TrustError::Inspect(_))));
    }

    #[test]
    fn ports_are_tracked_independently() {
        let dir = TempDir::new().unwrap();
        let mut gate = gate(
            &dir,
            StaticInspector::new()
                .with_owner(8332, ProcessIdentity::uniform(1000))
                .with_owner(18332, ProcessIdentity::uniform(1001)),
        );

        gate.check(8332).unwrap();
        gate.check(18332).unwrap();
        assert_eq!(lines(&dir), vec!["8332:1000", "18332:1001"]);
    }
}
