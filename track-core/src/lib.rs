//! # Track Core
//!
//! Core logic for the grid track editor: a host UI forwards raw input
//! events, the core resolves them into intents, mutates the occupancy map,
//! and reports change notifications back for re-rendering.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 track-core                  │
//! ├─────────────────────────────────────────────┤
//! │  GridEditor       │  GestureResolver        │
//! │  - Board          │  - Drag threshold       │
//! │  - OccupancyMap   │  - Tap vs long press    │
//! │  - Snapshots      │  - Double-tap delete    │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod editor;
pub mod element;
pub mod error;
pub mod gesture;
pub mod occupancy;
pub mod snapshot;

pub use board::{Board, GridCoordinate, MAX_DIMENSION, MIN_DIMENSION};
pub use editor::{ChangeEvent, GridEditor};
pub use element::{ElementType, PlacedElement, Rotation};
pub use error::{TrackError, TrackResult};
pub use gesture::{DeviceClass, GestureConfig, GestureResolver, Intent, Position, PressSource};
pub use occupancy::OccupancyMap;
pub use snapshot::{Snapshot, SnapshotElement};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
