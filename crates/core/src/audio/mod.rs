use std::sync::{Arc, Mutex, MutexGuard};

use crate::analysis::{Snapshot, SpectrumAnalyser, FFT_SIZE};
use crate::config::AudioConfig;
use crate::{MotionError, Result};

/// Lifecycle of the microphone capture graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// No capture has ever been requested.
    Uninitialized,
    /// A permission request is in flight; frames keep running unmodulated.
    PermissionPending,
    /// The capture graph is live and feeding the analyser.
    Active,
    /// The last request was refused; a later user toggle may ask again.
    Denied,
}

/// Result of a permission request, reported by the host port.
#[derive(Debug)]
pub enum PermissionOutcome {
    /// Capture is live; the port keeps the stream handle alive and pushes
    /// blocks through its [`SampleSink`].
    Granted,
    Denied(String),
}

/// Host capability that acquires a live microphone stream.
///
/// `request` must not block the frame loop; a port may resolve immediately
/// or from another thread once the underlying prompt settles. There is no
/// cancellation for an in-flight request.
pub trait MicrophonePort {
    fn request(&mut self, sink: SampleSink, responder: PermissionResponder);
}

struct AdapterInner {
    state: AudioState,
    on: bool,
    analyser: SpectrumAnalyser,
    window: Vec<f32>,
    pending_denial: Option<String>,
}

impl AdapterInner {
    fn push(&mut self, samples: &[f32]) {
        self.window.extend_from_slice(samples);
        if self.window.len() > FFT_SIZE {
            self.window.drain(..self.window.len() - FFT_SIZE);
        }
    }
}

/// Microphone analysis adapter.
///
/// Owns the capture window and the spectrum analyser behind a shared lock;
/// the capture thread writes through [`SampleSink`] while the frame loop
/// pulls at most one [`Snapshot`] per frame, so there is no contention to
/// speak of. Disabling only clears the soft "on" flag — the capture graph
/// is intentionally kept alive so re-enabling reuses it without prompting
/// again (lightweight toggle semantics, not a leak).
#[derive(Clone)]
pub struct AudioAdapter {
    shared: Arc<Mutex<AdapterInner>>,
}

impl AudioAdapter {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            shared: Arc::new(Mutex::new(AdapterInner {
                state: AudioState::Uninitialized,
                on: false,
                analyser: SpectrumAnalyser::new(config),
                window: Vec::with_capacity(FFT_SIZE),
                pending_denial: None,
            })),
        }
    }

    pub fn state(&self) -> AudioState {
        self.lock().map(|inner| inner.state).unwrap_or(AudioState::Denied)
    }

    pub fn is_on(&self) -> bool {
        self.lock().map(|inner| inner.on).unwrap_or(false)
    }

    /// Flips the opt-in flag. Turning on for the first time (or after a
    /// denial, when the user explicitly asks again) starts a permission
    /// request through the injected port; an already-built graph is reused.
    pub fn toggle(&self, port: &mut dyn MicrophonePort) {
        let request = match self.lock() {
            Ok(mut inner) => {
                inner.on = !inner.on;
                let needs_request = inner.on
                    && matches!(
                        inner.state,
                        AudioState::Uninitialized | AudioState::Denied
                    );
                if needs_request {
                    inner.state = AudioState::PermissionPending;
                }
                needs_request
            }
            Err(_) => false,
        };

        if request {
            port.request(self.sink(), self.responder());
        }
    }

    /// Opt in; no-op when already on.
    pub fn enable(&self, port: &mut dyn MicrophonePort) {
        if !self.is_on() {
            self.toggle(port);
        }
    }

    /// Soft off. Deliberately leaves the stream and analyser in place.
    pub fn disable(&self) {
        if let Ok(mut inner) = self.lock() {
            inner.on = false;
        }
    }

    /// Current frequency snapshot, or `None` whenever the visual should run
    /// unmodulated (never enabled, pending, denied, or switched off).
    pub fn sample(&self) -> Option<Snapshot> {
        let mut guard = self.lock().ok()?;
        let inner = &mut *guard;
        if !inner.on || inner.state != AudioState::Active {
            return None;
        }
        inner.analyser.analyse(&inner.window).ok()
    }

    /// Consumes a pending denial so the caller can apply the UI transition
    /// (toggle reverted, visible error marker) exactly once.
    pub fn take_denial(&self) -> Option<String> {
        self.lock().ok()?.pending_denial.take()
    }

    pub fn sink(&self) -> SampleSink {
        SampleSink {
            shared: self.shared.clone(),
        }
    }

    fn responder(&self) -> PermissionResponder {
        PermissionResponder {
            shared: self.shared.clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, AdapterInner>> {
        self.shared
            .lock()
            .map_err(|_| MotionError::msg("audio adapter has been poisoned"))
    }
}

impl std::fmt::Debug for AudioAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioAdapter")
            .field("state", &self.state())
            .field("on", &self.is_on())
            .finish()
    }
}

/// Write half handed to the capture thread.
#[derive(Clone)]
pub struct SampleSink {
    shared: Arc<Mutex<AdapterInner>>,
}

impl SampleSink {
    /// Appends a capture block to the rolling analysis window. Errors are
    /// swallowed; a capture thread has nowhere useful to report them.
    pub fn push(&self, samples: &[f32]) {
        if let Ok(mut inner) = self.shared.lock() {
            inner.push(samples);
        }
    }
}

impl std::fmt::Debug for SampleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleSink").finish()
    }
}

/// Completion handle for an in-flight permission request.
#[derive(Clone)]
pub struct PermissionResponder {
    shared: Arc<Mutex<AdapterInner>>,
}

impl PermissionResponder {
    pub fn resolve(&self, outcome: PermissionOutcome) {
        let Ok(mut inner) = self.shared.lock() else {
            return;
        };
        match outcome {
            PermissionOutcome::Granted => {
                // A user may have toggled back off while the prompt was up;
                // the graph still comes up and stays warm for the next on.
                inner.state = AudioState::Active;
            }
            PermissionOutcome::Denied(reason) => {
                inner.state = AudioState::Denied;
                inner.on = false;
                inner.pending_denial = Some(reason);
            }
        }
    }
}

impl std::fmt::Debug for PermissionResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResponder").finish()
    }
}
