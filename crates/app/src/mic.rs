use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hero_motion_core::{MicrophonePort, PermissionOutcome, PermissionResponder, SampleSink};

/// Microphone capability backed by the default cpal input device.
///
/// The stream handle stays alive inside the port for the life of the
/// process, matching the adapter's lightweight toggle semantics: disabling
/// audio never tears the capture graph down.
pub struct CpalMicrophonePort {
    /// Keep-alive handle; capture stops if this drops.
    _stream: Option<cpal::Stream>,
}

impl CpalMicrophonePort {
    pub fn new() -> Self {
        Self { _stream: None }
    }

    fn open(&self, sink: SampleSink) -> Result<cpal::Stream, String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| "no input device available".to_string())?;
        let config = device
            .default_input_config()
            .map_err(|e| format!("querying input config failed: {e}"))?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(format!(
                "unsupported input sample format {:?}",
                config.sample_format()
            ));
        }

        let channels = config.channels() as usize;
        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = config.sample_rate().0,
            channels,
            "opening microphone capture"
        );

        let mut mono = Vec::new();
        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if channels <= 1 {
                        sink.push(data);
                    } else {
                        mono.clear();
                        mono.extend(
                            data.chunks(channels)
                                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                        );
                        sink.push(&mono);
                    }
                },
                |err| tracing::warn!(%err, "microphone stream error"),
                None,
            )
            .map_err(|e| format!("building input stream failed: {e}"))?;
        stream
            .play()
            .map_err(|e| format!("starting input stream failed: {e}"))?;
        Ok(stream)
    }
}

impl Default for CpalMicrophonePort {
    fn default() -> Self {
        Self::new()
    }
}

impl MicrophonePort for CpalMicrophonePort {
    fn request(&mut self, sink: SampleSink, responder: PermissionResponder) {
        match self.open(sink) {
            Ok(stream) => {
                self._stream = Some(stream);
                responder.resolve(PermissionOutcome::Granted);
            }
            Err(reason) => responder.resolve(PermissionOutcome::Denied(reason)),
        }
    }
}
