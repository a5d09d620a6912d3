//! # Gesture resolution
//!
//! Turns a temporally-ordered stream of low-level press/move/release events
//! into at most one high-level [`Intent`] per interaction.
//!
//! The same physical gesture means different things depending on where it
//! started and how it ended:
//!
//! ```text
//! toolbar press ──── release over cell ──────────────→ Place
//! element press ──── drag past threshold ── release ─→ Move (unless back on source)
//! element press ──── short tap ──────────────────────→ Rotate (or Delete on double tap)
//! element press ──── long press (pointer) ───────────→ Delete
//! element secondary click ───────────────────────────→ Delete
//! ```

use serde::{Deserialize, Serialize};

use crate::board::GridCoordinate;
use crate::element::ElementType;

/// A point in host pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X in pixels.
    pub x: f32,
    /// Y in pixels.
    pub y: f32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Whether the delta to `other` exceeds `threshold` on either axis.
    #[must_use]
    pub fn axis_delta_exceeds(self, other: Self, threshold: f32) -> bool {
        (self.x - other.x).abs() > threshold || (self.y - other.y).abs() > threshold
    }
}

/// What the interaction started on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "data", rename_all = "lowercase")]
pub enum PressSource {
    /// A toolbar item carrying an element type.
    Toolbar(ElementType),
    /// An element already placed on the grid.
    Placed(GridCoordinate),
}

/// Device class the input stream comes from.
///
/// Touch devices disambiguate delete via double tap; pointer devices use
/// long press instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Mouse or pen input.
    Pointer,
    /// Touch-capable input.
    Touch,
}

/// A resolved high-level action derived from raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "data", rename_all = "lowercase")]
pub enum Intent {
    /// Place a new element of the given type.
    Place {
        /// Target cell.
        cell: GridCoordinate,
        /// Type to place.
        element_type: ElementType,
    },

    /// Move an existing element between cells.
    Move {
        /// Source cell.
        from: GridCoordinate,
        /// Target cell.
        to: GridCoordinate,
    },

    /// Rotate the element at a cell a quarter turn.
    Rotate(GridCoordinate),

    /// Remove the element at a cell.
    Delete(GridCoordinate),
}

/// Configuration for gesture disambiguation.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Movement below this on both axes is still a tap, not a drag.
    pub drag_threshold_px: f32,
    /// Press shorter than this is a tap; longer is a long press.
    pub short_press_ms: u64,
    /// Second tap within this window counts toward a double tap.
    pub double_tap_window_ms: u64,
    /// Second tap within this radius counts toward a double tap.
    pub double_tap_radius_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 10.0,
            short_press_ms: 300,
            double_tap_window_ms: 300,
            double_tap_radius_px: 50.0,
        }
    }
}

/// An interaction in flight: pressed, possibly dragging, not yet released.
#[derive(Debug, Clone)]
struct ActivePress {
    source: PressSource,
    start: Position,
    start_ms: u64,
    dragging: bool,
}

/// The previous completed tap, kept for double-tap detection.
#[derive(Debug, Clone, Copy)]
struct TapRecord {
    position: Position,
    timestamp_ms: u64,
}

/// Gesture state machine.
///
/// One resolver per input surface. Feed it `press`, `moved`, and `release`
/// in event order; `release` yields the resolved [`Intent`], if any. State is
/// reset after every completed or cancelled interaction, so an interrupted
/// stream leaves nothing behind that the next `press` does not overwrite.
#[derive(Debug)]
pub struct GestureResolver {
    config: GestureConfig,
    device: DeviceClass,
    active: Option<ActivePress>,
    last_tap: Option<TapRecord>,
}

impl GestureResolver {
    /// Create a resolver for the given device class with default config.
    #[must_use]
    pub fn new(device: DeviceClass) -> Self {
        Self::with_config(device, GestureConfig::default())
    }

    /// Create with custom configuration.
    #[must_use]
    pub fn with_config(device: DeviceClass, config: GestureConfig) -> Self {
        Self {
            config,
            device,
            active: None,
            last_tap: None,
        }
    }

    /// Get the current configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The device class this resolver disambiguates for.
    #[must_use]
    pub const fn device(&self) -> DeviceClass {
        self.device
    }

    /// Whether an interaction is currently in flight.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.active.is_some()
    }

    /// Begin an interaction. Overwrites any residual in-flight state.
    pub fn press(&mut self, source: PressSource, position: Position, timestamp_ms: u64) {
        self.active = Some(ActivePress {
            source,
            start: position,
            start_ms: timestamp_ms,
            dragging: false,
        });
    }

    /// Record pointer movement during a press.
    ///
    /// Once displacement from the press point exceeds the drag threshold on
    /// either axis the interaction is a drag for the rest of its life.
    pub fn moved(&mut self, position: Position) {
        if let Some(active) = self.active.as_mut() {
            if !active.dragging
                && active
                    .start
                    .axis_delta_exceeds(position, self.config.drag_threshold_px)
            {
                active.dragging = true;
            }
        }
    }

    /// End the interaction and resolve it to an intent.
    ///
    /// `cell` is the grid cell under the release point, if any. Returns
    /// `None` when the interaction cancels (release off-grid for a drag,
    /// drag back onto its source cell, or an unsupported duration/device
    /// combination).
    pub fn release(
        &mut self,
        position: Position,
        cell: Option<GridCoordinate>,
        timestamp_ms: u64,
    ) -> Option<Intent> {
        let active = self.active.take()?;
        let intent = self.resolve(&active, position, cell, timestamp_ms);
        if let Some(intent) = &intent {
            tracing::debug!(?intent, "gesture resolved");
        }
        intent
    }

    /// Abort the in-flight interaction without resolving it.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Secondary-button press on a placed element: immediate delete,
    /// independent of the press/release state machine.
    pub fn secondary_press(&mut self, cell: GridCoordinate) -> Intent {
        self.active = None;
        tracing::debug!(%cell, "secondary press");
        Intent::Delete(cell)
    }

    fn resolve(
        &mut self,
        active: &ActivePress,
        position: Position,
        cell: Option<GridCoordinate>,
        timestamp_ms: u64,
    ) -> Option<Intent> {
        match &active.source {
            // Toolbar items are not independently tappable: a press that
            // ends over a cell always places, drag distance notwithstanding.
            PressSource::Toolbar(element_type) => cell.map(|target| Intent::Place {
                cell: target,
                element_type: element_type.clone(),
            }),

            PressSource::Placed(source_cell) => {
                if active.dragging {
                    match cell {
                        Some(target) if target != *source_cell => Some(Intent::Move {
                            from: *source_cell,
                            to: target,
                        }),
                        // Dropped back onto its own cell, or off-grid.
                        _ => None,
                    }
                } else {
                    let duration_ms = timestamp_ms.saturating_sub(active.start_ms);
                    if duration_ms < self.config.short_press_ms {
                        match self.device {
                            DeviceClass::Touch => {
                                Some(self.resolve_tap(*source_cell, position, timestamp_ms))
                            }
                            DeviceClass::Pointer => Some(Intent::Rotate(*source_cell)),
                        }
                    } else {
                        match self.device {
                            // Long-press-to-delete is a pointer affordance;
                            // touch devices delete via double tap.
                            DeviceClass::Pointer => Some(Intent::Delete(*source_cell)),
                            DeviceClass::Touch => None,
                        }
                    }
                }
            }
        }
    }

    /// Classify a short touch tap as the second half of a double tap
    /// (delete) or a fresh single tap (rotate, remembered for next time).
    fn resolve_tap(
        &mut self,
        source_cell: GridCoordinate,
        position: Position,
        timestamp_ms: u64,
    ) -> Intent {
        let is_double = self.last_tap.is_some_and(|last| {
            timestamp_ms.saturating_sub(last.timestamp_ms) < self.config.double_tap_window_ms
                && last.position.distance_to(position) < self.config.double_tap_radius_px
        });

        if is_double {
            self.last_tap = None;
            Intent::Delete(source_cell)
        } else {
            self.last_tap = Some(TapRecord {
                position,
                timestamp_ms,
            });
            Intent::Rotate(source_cell)
        }
    }
}
