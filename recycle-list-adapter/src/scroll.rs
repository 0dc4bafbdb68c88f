use recycle_list::DEFAULT_IS_SCROLLING_RESET_DELAY_MS;

/// Observable scroll state of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// What the caller should do after a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recompute {
    /// Nothing to do (a frame is already pending, or the coordinator was cancelled).
    Skip,
    /// Request a display refresh; recompute when it fires.
    NextFrame,
    /// Recompute synchronously.
    Now,
}

/// Turns raw scroll/resize notifications into recompute requests.
///
/// - Scroll bursts are coalesced: at most one frame is requested until that frame runs.
/// - Every scroll notification marks the list as scrolling; [`Self::update`] flips it back to
///   idle once no notification arrived for `reset_delay_ms`.
/// - Resizes are never coalesced.
///
/// Time is a caller-supplied monotonic millisecond clock.
#[derive(Clone, Debug)]
pub struct ScrollCoordinator {
    frame_pending: bool,
    phase: ScrollPhase,
    last_scroll_ms: Option<u64>,
    reset_delay_ms: u64,
    cancelled: bool,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_IS_SCROLLING_RESET_DELAY_MS)
    }
}

impl ScrollCoordinator {
    pub fn new(reset_delay_ms: u64) -> Self {
        Self {
            frame_pending: false,
            phase: ScrollPhase::Idle,
            last_scroll_ms: None,
            reset_delay_ms,
            cancelled: false,
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn reset_delay_ms(&self) -> u64 {
        self.reset_delay_ms
    }

    pub fn set_reset_delay_ms(&mut self, delay_ms: u64) {
        self.reset_delay_ms = delay_ms;
    }

    /// Records a scroll notification at `now_ms`.
    ///
    /// Returns [`Recompute::NextFrame`] only for the first notification since the last frame.
    pub fn on_scroll(&mut self, now_ms: u64) -> Recompute {
        if self.cancelled {
            return Recompute::Skip;
        }
        self.last_scroll_ms = Some(now_ms);
        self.phase = ScrollPhase::Scrolling;
        if self.frame_pending {
            return Recompute::Skip;
        }
        self.frame_pending = true;
        Recompute::NextFrame
    }

    /// Records a resize notification; always asks for a synchronous recompute.
    pub fn on_resize(&mut self) -> Recompute {
        if self.cancelled {
            return Recompute::Skip;
        }
        Recompute::Now
    }

    /// Consumes the pending frame. Returns `true` when the caller should recompute.
    pub fn take_frame(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        core::mem::replace(&mut self.frame_pending, false)
    }

    /// When the list will become idle if no further scroll notification arrives.
    pub fn idle_deadline(&self) -> Option<u64> {
        if self.phase != ScrollPhase::Scrolling {
            return None;
        }
        self.last_scroll_ms
            .map(|last| last.saturating_add(self.reset_delay_ms))
    }

    /// Advances the quiescence timer. Returns `true` on the Scrolling → Idle transition.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if self.cancelled || self.phase != ScrollPhase::Scrolling {
            return false;
        }
        let Some(last) = self.last_scroll_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.reset_delay_ms {
            return false;
        }
        self.phase = ScrollPhase::Idle;
        self.last_scroll_ms = None;
        true
    }

    /// Drops the pending frame and the quiescence timer, and ignores everything afterwards.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.frame_pending = false;
        self.phase = ScrollPhase::Idle;
        self.last_scroll_ms = None;
    }
}
