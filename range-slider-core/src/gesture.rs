//! Pointer gesture resolution for the two thumbs.
//!
//! [`GestureResolver`] decides which thumb a pointer sequence manipulates and
//! translates raw pointer events into [`GestureStep`]s for the controller.
//! It never touches the value model itself.
//!
//! ```text
//! Idle --down on thumb--> Pressed --moved past slop--> Dragging --up/cancel--> Idle
//!   \                        \--up within slop (tap)-------------------------/
//!    \--down on track--> PendingSeek --up within slop (tap-to-seek)--> Idle
//! ```
//!
//! With a touch slop of zero the `Pressed` state is skipped and a drag
//! starts on pointer-down.

use tracing::{debug, trace};

/// One of the two draggable handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Thumb {
    /// The handle selecting the lower value.
    Lower,
    /// The handle selecting the upper value.
    Upper,
}

impl Thumb {
    /// Returns the opposite thumb.
    pub fn other(self) -> Self {
        match self {
            Thumb::Lower => Thumb::Upper,
            Thumb::Upper => Thumb::Lower,
        }
    }
}

/// A pointer sample along the slider's horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Platform pointer identifier.
    pub pointer: u64,
    /// X coordinate relative to the widget's left edge.
    pub x: f32,
}

impl PointerEvent {
    /// Creates a pointer sample.
    pub const fn new(pointer: u64, x: f32) -> Self {
        Self { pointer, x }
    }

    /// A sample from the primary pointer (id `0`).
    pub const fn primary(x: f32) -> Self {
        Self::new(0, x)
    }
}

/// Screen-space thumb positions used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    /// Centre x of the lower thumb, `None` while it is hidden.
    pub lower_x: Option<f32>,
    /// Centre x of the upper thumb, `None` while it is hidden.
    pub upper_x: Option<f32>,
    /// Horizontal reach of each thumb's hit zone from its centre.
    pub half_width: f32,
    /// Full widget width, used by the overlap tie-break.
    pub widget_width: f32,
}

impl HitTarget {
    fn center(&self, thumb: Thumb) -> Option<f32> {
        match thumb {
            Thumb::Lower => self.lower_x,
            Thumb::Upper => self.upper_x,
        }
    }
}

/// Picks a thumb for a touch on two coinciding thumbs.
///
/// A touch in the right half grabs the upper thumb, anything else the lower
/// one, so stacked thumbs can always be pulled apart.
fn overlap_tie_break(x: f32, widget_width: f32) -> Thumb {
    if widget_width > 0.0 && x / widget_width > 0.5 {
        Thumb::Upper
    } else {
        Thumb::Lower
    }
}

/// Returns the thumb whose hit zone contains `x`, resolving overlaps with the
/// half-width tie-break. `None` means the slider does not claim the touch.
pub fn hit_test(x: f32, target: &HitTarget) -> Option<Thumb> {
    if x.is_nan() {
        return None;
    }
    let hits = |center: Option<f32>| center.is_some_and(|c| (x - c).abs() <= target.half_width);
    match (hits(target.lower_x), hits(target.upper_x)) {
        (true, true) => Some(overlap_tie_break(x, target.widget_width)),
        (true, false) => Some(Thumb::Lower),
        (false, true) => Some(Thumb::Upper),
        (false, false) => None,
    }
}

/// Returns the visible thumb closest to `x`, used for tap-to-seek.
///
/// When both thumbs sit at the same spot the one on the side of `x` wins;
/// a tap exactly on the shared centre falls back to the overlap tie-break.
pub fn nearest_thumb(x: f32, target: &HitTarget) -> Option<Thumb> {
    match (target.lower_x, target.upper_x) {
        (Some(lower), Some(upper)) => {
            let to_lower = (x - lower).abs();
            let to_upper = (x - upper).abs();
            if (to_lower - to_upper).abs() > f32::EPSILON {
                Some(if to_lower < to_upper {
                    Thumb::Lower
                } else {
                    Thumb::Upper
                })
            } else if x < lower {
                Some(Thumb::Lower)
            } else if x > upper {
                Some(Thumb::Upper)
            } else {
                Some(overlap_tie_break(x, target.widget_width))
            }
        }
        (Some(_), None) => Some(Thumb::Lower),
        (None, Some(_)) => Some(Thumb::Upper),
        (None, None) => None,
    }
}

/// Current state of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No pointer is being tracked.
    #[default]
    Idle,
    /// A pointer went down on the track away from both thumbs. The touch is
    /// not claimed, but a release inside the slop seeks the nearest thumb.
    PendingSeek,
    /// A pointer went down on a thumb and has not moved past the slop yet.
    Pressed(Thumb),
    /// A thumb is being dragged.
    Dragging(Thumb),
}

/// What the controller should do in response to a pointer event.
///
/// Positions carried by the variants already have the touch offset removed,
/// they are where the thumb centre should go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    /// The event is not claimed by the slider and should be passed on.
    Ignored,
    /// The event belongs to the slider but changes nothing.
    Claimed,
    /// A drag of `thumb` begins at `x`.
    DragStarted {
        /// Thumb being dragged.
        thumb: Thumb,
        /// Target thumb centre.
        x: f32,
    },
    /// The dragged thumb moves to `x`.
    Moved {
        /// Thumb being dragged.
        thumb: Thumb,
        /// Target thumb centre.
        x: f32,
    },
    /// The pointer lifted; `thumb` settles at `x`. `dragged` is `false` for a
    /// tap that never crossed the slop.
    Released {
        /// Thumb that settles.
        thumb: Thumb,
        /// Final thumb centre.
        x: f32,
        /// Whether a drag was in progress.
        dragged: bool,
    },
    /// The gesture was aborted.
    Cancelled {
        /// Thumb that was pressed or dragged.
        thumb: Thumb,
        /// Whether a drag was in progress.
        dragged: bool,
    },
}

/// Per-gesture pointer state of one slider.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureResolver {
    touch_slop: f32,
    keep_touch_offset: bool,
    phase: GesturePhase,
    active_pointer: Option<u64>,
    down_x: f32,
    touch_offset: f32,
}

impl Default for GestureResolver {
    fn default() -> Self {
        Self::new(0.0, false)
    }
}

impl GestureResolver {
    /// Creates a resolver.
    ///
    /// `touch_slop` is the distance a pressed pointer must travel before it
    /// counts as a drag; `0.0` starts drags immediately. With
    /// `keep_touch_offset` the distance between pointer and thumb centre at
    /// press time is kept for the whole drag.
    pub fn new(touch_slop: f32, keep_touch_offset: bool) -> Self {
        Self {
            touch_slop: sanitize_slop(touch_slop),
            keep_touch_offset,
            phase: GesturePhase::Idle,
            active_pointer: None,
            down_x: 0.0,
            touch_offset: 0.0,
        }
    }

    /// Movement threshold separating a tap from a drag.
    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    /// Changes the movement threshold. Takes effect on the next gesture.
    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.touch_slop = sanitize_slop(touch_slop);
    }

    /// Whether the grab offset is kept during drags.
    pub fn keep_touch_offset(&self) -> bool {
        self.keep_touch_offset
    }

    /// Enables or disables keeping the grab offset.
    pub fn set_keep_touch_offset(&mut self, keep_touch_offset: bool) {
        self.keep_touch_offset = keep_touch_offset;
    }

    /// Current state machine phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The thumb owning the pointer, pressed or dragging.
    pub fn active_thumb(&self) -> Option<Thumb> {
        match self.phase {
            GesturePhase::Pressed(thumb) | GesturePhase::Dragging(thumb) => Some(thumb),
            GesturePhase::Idle | GesturePhase::PendingSeek => None,
        }
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging(_))
    }

    /// Identifier of the pointer being tracked.
    pub fn active_pointer(&self) -> Option<u64> {
        self.active_pointer
    }

    /// Offset between pointer and thumb centre captured at press time.
    pub fn touch_offset(&self) -> f32 {
        self.touch_offset
    }

    fn past_slop(&self, x: f32) -> bool {
        (x - self.down_x).abs() > self.touch_slop
    }

    fn capture_offset(&mut self, x: f32, thumb: Thumb, target: &HitTarget) {
        self.touch_offset = match target.center(thumb) {
            Some(center) if self.keep_touch_offset => x - center,
            _ => 0.0,
        };
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.active_pointer = None;
        self.touch_offset = 0.0;
    }

    fn is_active_pointer(&self, event: &PointerEvent) -> bool {
        self.active_pointer == Some(event.pointer)
    }

    /// Handles the first pointer going down.
    ///
    /// A down event arriving while a thumb is held is treated as a secondary
    /// pointer. Anything else starts a new gesture, dropping a pending seek
    /// whose up never arrived.
    pub fn pointer_down(&mut self, event: PointerEvent, target: &HitTarget) -> GestureStep {
        if self.active_thumb().is_some() {
            return self.secondary_pointer_down(event, target);
        }
        self.reset();
        if event.x.is_nan() {
            return GestureStep::Ignored;
        }

        self.active_pointer = Some(event.pointer);
        self.down_x = event.x;

        let Some(thumb) = hit_test(event.x, target) else {
            self.phase = GesturePhase::PendingSeek;
            trace!(x = event.x, "pointer down missed both thumbs");
            return GestureStep::Ignored;
        };

        self.capture_offset(event.x, thumb, target);
        if self.touch_slop <= 0.0 {
            self.phase = GesturePhase::Dragging(thumb);
            debug!(?thumb, x = event.x, "drag started on press");
            GestureStep::DragStarted {
                thumb,
                x: event.x - self.touch_offset,
            }
        } else {
            self.phase = GesturePhase::Pressed(thumb);
            debug!(?thumb, x = event.x, "thumb pressed");
            GestureStep::Claimed
        }
    }

    /// Handles movement of a tracked pointer.
    pub fn pointer_move(&mut self, event: PointerEvent) -> GestureStep {
        if !self.is_active_pointer(&event) || event.x.is_nan() {
            return GestureStep::Ignored;
        }
        match self.phase {
            GesturePhase::Idle => GestureStep::Ignored,
            GesturePhase::PendingSeek => {
                if self.past_slop(event.x) {
                    trace!("track touch became a scroll, dropping seek");
                    self.reset();
                }
                GestureStep::Ignored
            }
            GesturePhase::Pressed(thumb) => {
                if self.past_slop(event.x) {
                    self.phase = GesturePhase::Dragging(thumb);
                    debug!(?thumb, x = event.x, "drag started past slop");
                    GestureStep::DragStarted {
                        thumb,
                        x: event.x - self.touch_offset,
                    }
                } else {
                    GestureStep::Claimed
                }
            }
            GesturePhase::Dragging(thumb) => GestureStep::Moved {
                thumb,
                x: event.x - self.touch_offset,
            },
        }
    }

    /// Handles the tracked pointer lifting. An up without a usable position
    /// ends the gesture like a cancel.
    pub fn pointer_up(&mut self, event: PointerEvent, target: &HitTarget) -> GestureStep {
        if !self.is_active_pointer(&event) {
            return GestureStep::Ignored;
        }
        if !event.x.is_finite() {
            return self.pointer_cancel();
        }
        let step = match self.phase {
            GesturePhase::Idle => GestureStep::Ignored,
            GesturePhase::PendingSeek => {
                if self.past_slop(event.x) {
                    GestureStep::Ignored
                } else {
                    match nearest_thumb(event.x, target) {
                        Some(thumb) => GestureStep::Released {
                            thumb,
                            x: event.x,
                            dragged: false,
                        },
                        None => GestureStep::Ignored,
                    }
                }
            }
            GesturePhase::Pressed(thumb) => GestureStep::Released {
                thumb,
                x: event.x - self.touch_offset,
                dragged: false,
            },
            GesturePhase::Dragging(thumb) => GestureStep::Released {
                thumb,
                x: event.x - self.touch_offset,
                dragged: true,
            },
        };
        debug!(?step, "pointer released");
        self.reset();
        step
    }

    /// Aborts the current gesture.
    pub fn pointer_cancel(&mut self) -> GestureStep {
        let step = match self.phase {
            GesturePhase::Pressed(thumb) => GestureStep::Cancelled {
                thumb,
                dragged: false,
            },
            GesturePhase::Dragging(thumb) => GestureStep::Cancelled {
                thumb,
                dragged: true,
            },
            GesturePhase::Idle | GesturePhase::PendingSeek => GestureStep::Ignored,
        };
        if step != GestureStep::Ignored {
            debug!(?step, "gesture cancelled");
        }
        self.reset();
        step
    }

    /// Hands the gesture over to a newly pressed pointer.
    pub fn secondary_pointer_down(&mut self, event: PointerEvent, target: &HitTarget) -> GestureStep {
        let Some(thumb) = self.active_thumb() else {
            return GestureStep::Ignored;
        };
        if event.x.is_nan() {
            return GestureStep::Claimed;
        }
        self.active_pointer = Some(event.pointer);
        self.down_x = event.x;
        self.capture_offset(event.x, thumb, target);
        debug!(pointer = event.pointer, "secondary pointer took over");
        GestureStep::Claimed
    }

    /// Handles a non-final pointer lifting. If it was the tracked pointer,
    /// tracking continues with `remaining`.
    pub fn secondary_pointer_up(
        &mut self,
        lifted: PointerEvent,
        remaining: PointerEvent,
        target: &HitTarget,
    ) -> GestureStep {
        let Some(thumb) = self.active_thumb() else {
            return GestureStep::Ignored;
        };
        if self.is_active_pointer(&lifted) && !remaining.x.is_nan() {
            self.active_pointer = Some(remaining.pointer);
            self.down_x = remaining.x;
            self.capture_offset(remaining.x, thumb, target);
            debug!(pointer = remaining.pointer, "tracking moved to remaining pointer");
        }
        GestureStep::Claimed
    }
}

fn sanitize_slop(touch_slop: f32) -> f32 {
    if touch_slop.is_finite() && touch_slop > 0.0 {
        touch_slop
    } else {
        0.0
    }
}
