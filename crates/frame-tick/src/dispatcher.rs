//! Host-bound phase dispatch.
//!
//! A host engine drives a dispatcher through [`FrameHooks`]; application
//! code observes it through [`Dispatcher`]. End-of-frame is not a host hook:
//! it is raised right after late-update inside the same callback.
//!
//! ```text
//! host fixed_update(step)  ─► OnFixedUpdate(step)
//! host update(dt)          ─► OnUpdate(dt)
//! host late_update(dt)     ─► OnLateUpdate(dt) ─► OnEndFrameUpdate(dt)
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{Event, Listener, Phase};

/// Lifecycle callbacks a host engine invokes once per applicable phase.
pub trait FrameHooks {
    /// Regular per-frame update with the measured frame delta.
    fn update(&self, delta: f32);

    /// Late update with the same frame delta as [`FrameHooks::update`].
    fn late_update(&self, delta: f32);

    /// Fixed-timestep update with the configured physics step.
    fn fixed_update(&self, fixed_delta: f32);
}

/// Observable phase events re-exposed from host callbacks.
pub trait Dispatcher {
    /// The event raised for `phase`.
    fn event(&self, phase: Phase) -> &Event;

    /// Most recent frame delta handed in by the host, 0.0 before the first frame.
    fn delta_time(&self) -> f32;

    /// Drop every subscriber of every phase. Repeated calls do nothing.
    fn dispose(&self);

    fn is_disposed(&self) -> bool;

    fn subscribe(&self, phase: Phase, listener: Listener) {
        self.event(phase).subscribe(listener);
    }

    fn unsubscribe(&self, phase: Phase, listener: &Listener) -> bool {
        self.event(phase).unsubscribe(listener)
    }

    fn on_update(&self, listener: Listener) {
        self.subscribe(Phase::Update, listener);
    }

    fn on_late_update(&self, listener: Listener) {
        self.subscribe(Phase::LateUpdate, listener);
    }

    fn on_fixed_update(&self, listener: Listener) {
        self.subscribe(Phase::FixedUpdate, listener);
    }

    fn on_end_frame_update(&self, listener: Listener) {
        self.subscribe(Phase::EndOfFrame, listener);
    }
}

#[derive(Default)]
struct DispatcherInner {
    /// Indexed by [`Phase::index`].
    events: [Event; 4],
    delta_time: Mutex<f32>,
    disposed: AtomicBool,
}

/// Standard dispatcher: one [`Event`] per phase behind a shared handle.
///
/// Clones refer to the same dispatcher, so a host can keep one handle to pump
/// while a tick handler holds another.
#[derive(Clone, Default)]
pub struct FrameDispatcher {
    inner: Arc<DispatcherInner>,
}

impl FrameDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn raise(&self, phase: Phase, delta: f32) {
        let invoked = self.inner.events[phase.index()].raise(delta);
        trace!(%phase, delta, invoked, "dispatched phase");
    }

    fn record_frame_delta(&self, delta: f32) {
        *self.inner.delta_time.lock() = delta;
    }
}

impl FrameHooks for FrameDispatcher {
    fn update(&self, delta: f32) {
        self.record_frame_delta(delta);
        self.raise(Phase::Update, delta);
    }

    fn late_update(&self, delta: f32) {
        self.record_frame_delta(delta);
        self.raise(Phase::LateUpdate, delta);
        self.raise(Phase::EndOfFrame, delta);
    }

    fn fixed_update(&self, fixed_delta: f32) {
        self.raise(Phase::FixedUpdate, fixed_delta);
    }
}

impl Dispatcher for FrameDispatcher {
    fn event(&self, phase: Phase) -> &Event {
        &self.inner.events[phase.index()]
    }

    fn delta_time(&self) -> f32 {
        *self.inner.delta_time.lock()
    }

    fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        for event in &self.inner.events {
            event.clear();
        }
        debug!("frame dispatcher disposed");
    }

    fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl core::fmt::Debug for FrameDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("FrameDispatcher");
        for phase in Phase::ALL {
            s.field(phase.name(), &self.event(phase).len());
        }
        s.field("disposed", &self.is_disposed()).finish()
    }
}
