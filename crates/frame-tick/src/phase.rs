//! Frame phases.

use core::fmt;

/// A named point in the per-frame update cycle.
///
/// The set is closed: hosts cannot add phases at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Variable-rate update, once per rendered frame.
    Update,
    /// Runs after every `Update` listener of the frame has returned.
    LateUpdate,
    /// Fixed-timestep physics update, zero or more times per frame.
    FixedUpdate,
    /// Sub-phase raised right after `LateUpdate` within the same host callback.
    EndOfFrame,
}

impl Phase {
    /// All phases, in the order they fire within one frame.
    pub const ALL: [Self; 4] = [
        Self::FixedUpdate,
        Self::Update,
        Self::LateUpdate,
        Self::EndOfFrame,
    ];

    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::LateUpdate => "late_update",
            Self::FixedUpdate => "fixed_update",
            Self::EndOfFrame => "end_of_frame",
        }
    }

    /// Whether listeners of this phase receive the fixed physics step
    /// rather than the measured frame delta.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::FixedUpdate)
    }

    /// Slot of this phase in per-phase storage arrays.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
