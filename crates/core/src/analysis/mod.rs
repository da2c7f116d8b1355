use std::{f32::consts::PI, fmt, sync::Arc};

use realfft::{num_complex::Complex32, RealFftPlanner, RealToComplex};

use crate::config::AudioConfig;
use crate::Result;

/// Fixed transform size of the frequency analyser.
pub const FFT_SIZE: usize = 256;
/// Number of byte energy bins exposed per snapshot.
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// One frame of frequency-bin energies, 0..=255 per bin.
///
/// Copyable by value so readers never hold a lock while consuming it; the
/// analyser's internal buffer is the one allocated-once store.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(pub [u8; BIN_COUNT]);

impl Snapshot {
    pub fn bins(&self) -> &[u8] {
        &self.0
    }

    /// Bin energy with out-of-range indices reading as silence.
    pub fn bin(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("bins", &BIN_COUNT)
            .field("peak", &self.0.iter().max())
            .finish()
    }
}

/// Pull-based frequency analyser over a rolling capture window.
///
/// Mirrors the behaviour of a browser frequency analyser node: Hann
/// windowed 256-point real FFT, per-bin magnitude smoothing over time, and
/// a decibel range mapped onto unsigned bytes. The snapshot buffer is
/// allocated once and refreshed in place on every [`analyse`] call.
///
/// [`analyse`]: SpectrumAnalyser::analyse
pub struct SpectrumAnalyser {
    min_db: f32,
    max_db: f32,
    smoothing: f32,
    smoothed: [f32; BIN_COUNT],
    snapshot: Snapshot,
    plan: Arc<dyn RealToComplex<f32>>,
    input: Vec<f32>,
    spectrum: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl SpectrumAnalyser {
    pub fn new(config: &AudioConfig) -> Self {
        let plan = RealFftPlanner::<f32>::new().plan_fft_forward(FFT_SIZE);
        let input = plan.make_input_vec();
        let spectrum = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();
        Self {
            min_db: config.min_db,
            max_db: config.max_db,
            smoothing: config.smoothing.clamp(0.0, 1.0),
            smoothed: [0.0; BIN_COUNT],
            snapshot: Snapshot([0; BIN_COUNT]),
            plan,
            input,
            spectrum,
            scratch,
        }
    }

    pub fn bin_count(&self) -> usize {
        BIN_COUNT
    }

    /// Refreshes the snapshot from the most recent `FFT_SIZE` samples of
    /// `window`. Shorter windows are zero-padded at the front so a stream
    /// that has just started still analyses cleanly.
    pub fn analyse(&mut self, window: &[f32]) -> Result<Snapshot> {
        let tail = if window.len() > FFT_SIZE {
            &window[window.len() - FFT_SIZE..]
        } else {
            window
        };
        let pad = FFT_SIZE - tail.len();
        for slot in &mut self.input[..pad] {
            *slot = 0.0;
        }
        for (index, value) in tail.iter().enumerate() {
            self.input[pad + index] = *value * hann_value(pad + index, FFT_SIZE);
        }

        self.plan
            .process_with_scratch(&mut self.input, &mut self.spectrum, &mut self.scratch)?;

        let span = (self.max_db - self.min_db).max(f32::EPSILON);
        for (index, bin) in self.spectrum.iter().take(BIN_COUNT).enumerate() {
            let magnitude = bin.norm() / FFT_SIZE as f32;
            let smoothed = self.smoothing * self.smoothed[index]
                + (1.0 - self.smoothing) * magnitude;
            self.smoothed[index] = smoothed;

            let db = if smoothed > 0.0 {
                20.0 * smoothed.log10()
            } else {
                self.min_db
            };
            let scaled = ((db - self.min_db) / span).clamp(0.0, 1.0);
            self.snapshot.0[index] = (scaled * 255.0) as u8;
        }

        Ok(self.snapshot)
    }

    /// Latest energies without recomputing.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }
}

impl fmt::Debug for SpectrumAnalyser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyser")
            .field("min_db", &self.min_db)
            .field("max_db", &self.max_db)
            .field("smoothing", &self.smoothing)
            .finish()
    }
}

fn hann_value(index: usize, len: usize) -> f32 {
    if len <= 1 {
        return 1.0;
    }

    0.5 - 0.5 * ((2.0 * PI * index as f32) / (len as f32 - 1.0)).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyser() -> SpectrumAnalyser {
        SpectrumAnalyser::new(&AudioConfig::default())
    }

    fn sine(freq_bin: f32, amplitude: f32) -> Vec<f32> {
        (0..FFT_SIZE)
            .map(|i| {
                amplitude * (2.0 * PI * freq_bin * i as f32 / FFT_SIZE as f32).sin()
            })
            .collect()
    }

    #[test]
    fn silence_reads_as_zero_energy() {
        let mut analyser = analyser();
        let snapshot = analyser.analyse(&[0.0; FFT_SIZE]).unwrap();
        assert!(snapshot.bins().iter().all(|&b| b == 0));
    }

    #[test]
    fn a_tone_concentrates_energy_near_its_bin() {
        let mut analyser = analyser();
        let block = sine(16.0, 0.8);
        // Smoothing starts from zero, run a few frames to settle.
        let mut snapshot = Snapshot([0; BIN_COUNT]);
        for _ in 0..20 {
            snapshot = analyser.analyse(&block).unwrap();
        }
        let peak = (0..BIN_COUNT).max_by_key(|&i| snapshot.bin(i)).unwrap();
        assert!((peak as i32 - 16).abs() <= 1, "peak at bin {peak}");
        assert!(snapshot.bin(peak) > snapshot.bin(100));
    }

    #[test]
    fn short_windows_are_zero_padded() {
        let mut analyser = analyser();
        let snapshot = analyser.analyse(&[0.5; 32]).unwrap();
        assert_eq!(snapshot.bins().len(), BIN_COUNT);
    }

    #[test]
    fn out_of_range_bins_read_as_silence() {
        let snapshot = Snapshot([7; BIN_COUNT]);
        assert_eq!(snapshot.bin(BIN_COUNT - 1), 7);
        assert_eq!(snapshot.bin(BIN_COUNT), 0);
    }
}
