//! Audio feedback
//!
//! Procedurally generated hit/miss tones - no external files needed!
//! The output device is opened lazily on the first audible tone and kept for
//! the rest of the session.

use thiserror::Error;

use crate::consts::*;

/// Feedback tone types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Target hit - high sine blip
    Hit,
    /// Missed click - low sawtooth buzz
    Miss,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Exponential pitch and gain envelope for one tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneShape {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    /// Seconds
    pub duration: f64,
}

impl Tone {
    pub fn shape(&self) -> ToneShape {
        let (waveform, start_hz) = match self {
            Tone::Hit => (Waveform::Sine, HIT_TONE_HZ),
            Tone::Miss => (Waveform::Sawtooth, MISS_TONE_HZ),
        };
        ToneShape {
            waveform,
            start_hz,
            end_hz: TONE_END_HZ,
            start_gain: TONE_START_GAIN,
            end_gain: TONE_END_GAIN,
            duration: TONE_DURATION_SECS,
        }
    }
}

/// Exponential interpolation from `from` to `to` at `t` in [0, 1]
fn exp_ramp(from: f32, to: f32, t: f64) -> f32 {
    let t = t.clamp(0.0, 1.0) as f32;
    from * (to / from).powf(t)
}

impl ToneShape {
    /// Oscillator frequency `secs` after the tone starts
    pub fn frequency_at(&self, secs: f64) -> f32 {
        exp_ramp(self.start_hz, self.end_hz, secs / self.duration)
    }

    /// Output gain `secs` after the tone starts (silent after the end)
    pub fn gain_at(&self, secs: f64) -> f32 {
        if secs > self.duration {
            return 0.0;
        }
        exp_ramp(self.start_gain, self.end_gain, secs / self.duration)
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
}

/// Something that can play a tone
pub trait ToneDevice {
    fn play(&mut self, shape: &ToneShape);
}

/// Opens the output device on first use
pub type DeviceOpener = Box<dyn FnMut() -> Result<Box<dyn ToneDevice>, AudioError>>;

enum DeviceSlot {
    Unopened,
    Ready(Box<dyn ToneDevice>),
    /// Opening failed; stay silent without retrying
    Unavailable,
}

/// Lazily-initialised audio output
pub struct AudioFeedback {
    slot: DeviceSlot,
    opener: DeviceOpener,
}

impl Default for AudioFeedback {
    fn default() -> Self {
        Self::platform()
    }
}

impl AudioFeedback {
    pub fn new(opener: DeviceOpener) -> Self {
        Self {
            slot: DeviceSlot::Unopened,
            opener,
        }
    }

    /// Web Audio in the browser, silence natively
    #[cfg(target_arch = "wasm32")]
    pub fn platform() -> Self {
        Self::new(Box::new(|| {
            WebAudioDevice::open().map(|d| Box::new(d) as Box<dyn ToneDevice>)
        }))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn platform() -> Self {
        Self::new(Box::new(|| Ok(Box::new(SilentDevice) as Box<dyn ToneDevice>)))
    }

    pub fn is_open(&self) -> bool {
        matches!(self.slot, DeviceSlot::Ready(_))
    }

    /// Play a tone; does nothing (and opens nothing) when `enabled` is false
    pub fn play(&mut self, tone: Tone, enabled: bool) {
        if !enabled {
            return;
        }

        if let DeviceSlot::Unopened = self.slot {
            self.slot = match (self.opener)() {
                Ok(device) => {
                    log::info!("Audio device opened");
                    DeviceSlot::Ready(device)
                }
                Err(e) => {
                    log::warn!("{} - audio disabled", e);
                    DeviceSlot::Unavailable
                }
            };
        }

        if let DeviceSlot::Ready(device) = &mut self.slot {
            device.play(&tone.shape());
        }
    }
}

/// Native stand-in: tones are logged, not played
#[derive(Debug, Default)]
pub struct SilentDevice;

impl ToneDevice for SilentDevice {
    fn play(&mut self, shape: &ToneShape) {
        log::trace!("tone {:?} {} Hz", shape.waveform, shape.start_hz);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioDevice;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioError, ToneDevice, ToneShape, Waveform};

    /// Web Audio output
    pub struct WebAudioDevice {
        ctx: AudioContext,
    }

    impl WebAudioDevice {
        pub fn open() -> Result<Self, AudioError> {
            // May fail outside a secure context
            let ctx = AudioContext::new()
                .map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
            Ok(Self { ctx })
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl ToneDevice for WebAudioDevice {
        fn play(&mut self, shape: &ToneShape) {
            // Resume context if suspended (browsers require user gesture)
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }

            let osc_type = match shape.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = self.create_osc(shape.start_hz, osc_type) else {
                return;
            };
            let t = self.ctx.current_time();
            let end = t + shape.duration;

            osc.frequency().set_value_at_time(shape.start_hz, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(shape.end_hz, end)
                .ok();
            gain.gain().set_value_at_time(shape.start_gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(shape.end_gain, end)
                .ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        played: Rc<RefCell<Vec<ToneShape>>>,
    }

    impl ToneDevice for Probe {
        fn play(&mut self, shape: &ToneShape) {
            self.played.borrow_mut().push(*shape);
        }
    }

    fn probe_audio() -> (AudioFeedback, Rc<RefCell<usize>>, Rc<RefCell<Vec<ToneShape>>>) {
        let opens = Rc::new(RefCell::new(0));
        let played = Rc::new(RefCell::new(Vec::new()));
        let (o, p) = (opens.clone(), played.clone());
        let audio = AudioFeedback::new(Box::new(move || {
            *o.borrow_mut() += 1;
            Ok(Box::new(Probe { played: p.clone() }) as Box<dyn ToneDevice>)
        }));
        (audio, opens, played)
    }

    #[test]
    fn test_hit_is_higher_than_miss() {
        let hit = Tone::Hit.shape();
        let miss = Tone::Miss.shape();
        assert!(hit.start_hz > miss.start_hz);
        assert_eq!(hit.waveform, Waveform::Sine);
        assert_eq!(miss.waveform, Waveform::Sawtooth);
        assert_eq!(hit.duration, 0.1);
    }

    #[test]
    fn test_envelope_decays_exponentially() {
        let shape = Tone::Hit.shape();
        assert!((shape.frequency_at(0.0) - 800.0).abs() < 1e-3);
        assert!((shape.frequency_at(0.1) - 10.0).abs() < 1e-3);
        // Halfway on a log scale: sqrt(800 * 10)
        assert!((shape.frequency_at(0.05) - 89.4427).abs() < 1e-2);
        assert!((shape.gain_at(0.0) - 0.1).abs() < 1e-6);
        assert!((shape.gain_at(0.1) - 0.01).abs() < 1e-6);
        assert_eq!(shape.gain_at(0.2), 0.0);
    }

    #[test]
    fn test_disabled_sound_never_opens_device() {
        let (mut audio, opens, played) = probe_audio();
        audio.play(Tone::Hit, false);
        audio.play(Tone::Miss, false);
        assert_eq!(*opens.borrow(), 0);
        assert!(played.borrow().is_empty());
        assert!(!audio.is_open());
    }

    #[test]
    fn test_device_opened_once_and_reused() {
        let (mut audio, opens, played) = probe_audio();
        audio.play(Tone::Hit, true);
        audio.play(Tone::Miss, true);
        audio.play(Tone::Hit, true);
        assert_eq!(*opens.borrow(), 1);
        assert_eq!(played.borrow().len(), 3);
        assert_eq!(played.borrow()[1].start_hz, 150.0);
    }

    #[test]
    fn test_failed_open_is_not_retried() {
        let attempts = Rc::new(RefCell::new(0));
        let a = attempts.clone();
        let mut audio = AudioFeedback::new(Box::new(move || {
            *a.borrow_mut() += 1;
            Err(AudioError::Unavailable("no output".into()))
        }));
        audio.play(Tone::Hit, true);
        audio.play(Tone::Hit, true);
        assert_eq!(*attempts.borrow(), 1);
        assert!(!audio.is_open());
    }
}
