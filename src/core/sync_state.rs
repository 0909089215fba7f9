//! Board synchronization phase machine
//!
//! Pure type state machine: only phase definitions and transition logic
//! live here. Runtime behavior (network calls, rendering, timers) is the
//! controller's job.
//!
//! Phase transitions:
//!
//! ```text
//! Idle ──→ Loading ──→ Ready
//!                   └─→ Failed
//!
//! Ready / Failed ──→ Loading   (user action or peer signal refetches)
//! ```

/// Current phase of the board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing loaded yet
    Idle,

    /// A remote round trip is in flight
    Loading,

    /// Local history mirrors the last confirmed snapshot
    Ready,

    /// The last round trip failed; a later action may recover
    Failed,
}

impl SyncPhase {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }

    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }

    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }

    /// Enters Loading. Allowed from every phase: refetching is always
    /// legal and a later completion simply supersedes an earlier one.
    pub fn begin_load(self) -> Self {
        Self::Loading
    }

    /// Transition after a round trip completes.
    pub fn complete(self, success: bool) -> Self {
        match self {
            Self::Loading if success => Self::Ready,
            Self::Loading => Self::Failed,
            other => other,
        }
    }
}

impl Default for SyncPhase {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_flow() {
        let mut phase = SyncPhase::Idle;

        phase = phase.begin_load();
        assert_eq!(phase, SyncPhase::Loading);
        assert!(phase.is_loading());

        phase = phase.complete(true);
        assert_eq!(phase, SyncPhase::Ready);
        assert!(phase.is_ready());
    }

    #[test]
    fn test_failed_load() {
        let phase = SyncPhase::Loading.complete(false);
        assert_eq!(phase, SyncPhase::Failed);
        assert!(phase.is_failed());
    }

    #[test]
    fn test_refetch_from_ready_and_failed() {
        assert_eq!(SyncPhase::Ready.begin_load(), SyncPhase::Loading);
        assert_eq!(SyncPhase::Failed.begin_load(), SyncPhase::Loading);
    }

    #[test]
    fn test_complete_outside_loading_is_identity() {
        assert_eq!(SyncPhase::Ready.complete(false), SyncPhase::Ready);
        assert_eq!(SyncPhase::Idle.complete(true), SyncPhase::Idle);
    }

    #[test]
    fn test_default_phase() {
        assert_eq!(SyncPhase::default(), SyncPhase::Idle);
        assert!(SyncPhase::default().is_idle());
    }
}
