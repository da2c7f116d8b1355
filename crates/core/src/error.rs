/// Result alias that carries the custom [`MotionError`] type.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Common error type for the core crate.
///
/// Nothing in the engine treats one of these as fatal: a failing subsystem
/// logs, degrades, and leaves its siblings running. The type exists so that
/// setup paths can propagate with `?` instead of panicking.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    /// Free-form error raised at a subsystem boundary.
    #[error("{0}")]
    Message(String),
    /// A caller handed a subsystem data it cannot work with.
    #[error("{0}")]
    InvalidInput(&'static str),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Failure inside the spectrum FFT.
    #[error("{0}")]
    Fft(#[from] realfft::FftError),
    /// Configuration could not be serialized or parsed.
    #[error("{0}")]
    Config(#[from] serde_json::Error),
}

impl MotionError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for MotionError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for MotionError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
