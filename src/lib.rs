//! textfx is the per-character motion and animation kernel behind terminal text effects.
//!
//! Every character of the input text becomes an [`EffectCharacter`] that owns:
//!
//! - a [`Motion`] moving it along eased, optionally curved [`Path`]s
//! - an [`Animation`] playing [`Scene`]s of symbol/color frames, by ticks or synced to motion
//! - an [`EventHandler`] wiring state transitions to [`Action`]s
//!
//! Effects build on the shared primitives: [`Gradient`]s and coordinate color mappings,
//! cached geometry ([`GeometryCache`]), spanning-tree link orders over a [`Grid`], and
//! [`SequenceEaser`] for easing progress through any ordered sequence.
#![forbid(unsafe_code)]

pub mod animation;
pub mod character;
pub mod color;
pub mod events;
pub mod foundation;
pub mod geometry;
pub mod graph;
pub mod motion;

pub use crate::animation::anim::Animation;
pub use crate::animation::ease::Ease;
pub use crate::animation::easer::{EasedStep, EasingTracker, SequenceEaser};
pub use crate::animation::scene::{
    CharacterVisual, Formatting, Frame, Scene, SceneConfig, SyncMode,
};
pub use crate::character::EffectCharacter;
pub use crate::color::gradient::{ColorMappingCache, Direction, Gradient, Steps};
pub use crate::color::palette::{Color, ColorPair, Rgb};
pub use crate::events::handler::{
    Action, Callback, Caller, Event, EventHandler, EventSource, FiredEvent,
};
pub use crate::foundation::config::{EngineConfig, LookupPolicy};
pub use crate::foundation::core::{BoundingBox, CharacterId, Coord, Point};
pub use crate::foundation::error::{TextfxError, TextfxResult};
pub use crate::foundation::ids::{PathHandle, PathKey, SceneHandle, SceneKey};
pub use crate::foundation::math::Lerp;
pub use crate::geometry::cache::GeometryCache;
pub use crate::graph::grid::Grid;
pub use crate::graph::spanning::{
    BreadthFirst, Link, PrimsSimple, PrimsWeighted, RecursiveBacktracker, SpanningAlgorithm,
};
pub use crate::motion::engine::{Motion, MotionProgress};
pub use crate::motion::path::{Path, PathConfig, Segment, Waypoint};
