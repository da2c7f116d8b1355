//! Core library for the Hero Motion background engine.
//!
//! The crate implements a frame-synchronized visual engine for an animated
//! landing page: a particle field drawn on a 2D pixel canvas and optionally
//! modulated by live microphone audio, an eased custom cursor follower, and
//! a set of scroll-triggered and entrance animations over page elements.
//! Each module owns a distinct subsystem (audio capture adapter, spectrum
//! analysis, particle simulation, timeline engine, frame driving) and every
//! continuously running piece is stepped by the single [`Director`] loop so
//! that tests can advance frames synthetically.

pub mod analysis;
pub mod audio;
pub mod config;
pub mod countup;
pub mod cursor;
pub mod director;
pub mod error;
pub mod gate;
pub mod hover;
pub mod particles;
pub mod render;
pub mod scroll;
pub mod stage;
pub mod timeline;

pub use analysis::{SpectrumAnalyser, Snapshot, BIN_COUNT, FFT_SIZE};
pub use audio::{AudioAdapter, AudioState, MicrophonePort, PermissionOutcome, PermissionResponder, SampleSink};
pub use config::{AppConfig, AudioConfig, CursorConfig, PageConfig, ParticleConfig};
pub use countup::CountUp;
pub use cursor::CursorFollower;
pub use director::{Director, HostBindings, Viewport};
pub use error::{MotionError, Result};
pub use gate::MotionGate;
pub use particles::{Particle, ParticleField};
pub use render::{Canvas, Hsla, PixelCanvas};
pub use scroll::{DirectScroll, ScrollEngine, ScrollOptions, ScrollState, SmoothScroll};
pub use stage::{Element, ElementId, ElementProps, ElementRole, ElementSpec, Stage, StageDescriptor};
pub use timeline::{
    Ease, MotionTimeline, NoopTimeline, Prop, PropSpan, Timeline, TimelineEvent, TriggerKind,
    TriggerRegion, TweenId, TweenSpec,
};
