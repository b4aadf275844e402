//! Label drag gestures.
//!
//! Pointer-down, move and up are folded into one explicit three-state machine
//! instead of being spread across independent handlers, which makes the
//! "defer redraw while dragging" rule a guard on the state rather than an
//! accident of handler ordering. A gesture begun against one scene epoch is
//! silently discarded if the scene was rebuilt underneath it.

use crate::core::{EquationId, EquationSet, LabelOffset};

/// Phase of the label drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging {
        equation: EquationId,
        scene_epoch: u64,
        label_origin: (f64, f64),
        pointer_start: (f64, f64),
    },
    Committing,
}

/// Pointer input fed to the state machine.
#[derive(Debug)]
pub enum DragEvent<'a> {
    PointerDown {
        equation: EquationId,
        /// Device position of the label when the gesture started.
        label_origin: (f64, f64),
        pointer: (f64, f64),
        scene_epoch: u64,
    },
    PointerMove {
        pointer: (f64, f64),
    },
    PointerUp {
        pointer: (f64, f64),
        current_epoch: u64,
        /// The dragged equation's stable reference point from the epoch the
        /// gesture started in.
        reference: Option<(f64, f64)>,
        equations: &'a mut EquationSet,
    },
}

/// What the host should do after feeding an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    None,
    /// Move the dragged label to this device position, visual feedback only.
    MoveLabelTo((f64, f64)),
    /// The offset was persisted on the equation.
    Committed {
        equation: EquationId,
        offset: LabelOffset,
    },
    /// The scene was rebuilt mid-gesture; nothing was applied.
    Discarded,
}

#[derive(Debug, Default)]
pub struct DragController {
    phase: DragPhase,
}

impl Default for DragPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// True while a gesture owns the dragged label's device position;
    /// redraws must be deferred for the duration.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The single transition function of the state machine.
    pub fn handle(&mut self, event: DragEvent<'_>) -> DragEffect {
        match (self.phase, event) {
            (
                DragPhase::Idle,
                DragEvent::PointerDown {
                    equation,
                    label_origin,
                    pointer,
                    scene_epoch,
                },
            ) => {
                self.phase = DragPhase::Dragging {
                    equation,
                    scene_epoch,
                    label_origin,
                    pointer_start: pointer,
                };
                DragEffect::None
            }

            (
                DragPhase::Dragging {
                    label_origin,
                    pointer_start,
                    ..
                },
                DragEvent::PointerMove { pointer },
            ) => DragEffect::MoveLabelTo((
                label_origin.0 + pointer.0 - pointer_start.0,
                label_origin.1 + pointer.1 - pointer_start.1,
            )),

            (
                DragPhase::Dragging {
                    equation,
                    scene_epoch,
                    label_origin,
                    pointer_start,
                },
                DragEvent::PointerUp {
                    pointer,
                    current_epoch,
                    reference,
                    equations,
                },
            ) => {
                self.phase = DragPhase::Committing;

                let effect = if scene_epoch != current_epoch {
                    DragEffect::Discarded
                } else if let Some((ref_x, ref_y)) = reference {
                    let final_x = label_origin.0 + pointer.0 - pointer_start.0;
                    let final_y = label_origin.1 + pointer.1 - pointer_start.1;
                    let offset = LabelOffset {
                        dx: final_x - ref_x,
                        dy: final_y - ref_y,
                    };
                    if equations.set_label_offset(equation, Some(offset)) {
                        DragEffect::Committed { equation, offset }
                    } else {
                        DragEffect::Discarded
                    }
                } else {
                    DragEffect::Discarded
                };

                self.phase = DragPhase::Idle;
                effect
            }

            // Pointer input that does not fit the current phase is ignored.
            _ => DragEffect::None,
        }
    }
}
