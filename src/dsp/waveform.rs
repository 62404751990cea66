//! Periodic waveform evaluation at an arbitrary point in time.

/*
Waveforms as Functions of Time
==============================

The oscilloscope does not stream samples at a fixed rate. It asks "what is
the voltage at time t?" for a few hundred points across the visible window,
and the window itself slides as the trace scrolls. So every shape here is a
pure function of (frequency, t), bipolar in [-1.0, +1.0].

Vocabulary
----------

  phase        Position inside one cycle, in [0, 1).
                 phase = (t × frequency) mod 1

  bipolar      Output swings between -1.0 and +1.0.
               The caller scales by amplitude (volts) and pixels per volt.


Shapes
------

SINE       sin(2π f t)

SQUARE     +1 while the sine is positive, -1 otherwise.
           Exactly the sign of the sine, so both shapes cross zero together.

TRIANGLE   4 |phase - 0.5| - 1
           Starts at +1, falls to -1 at half cycle, rises back to +1.

SAWTOOTH   2 (phase - 0.5)
           Linear ramp from -1 to +1, snapping back each cycle.

Negative time is normal here (the scroll offset pushes t below zero), so the
phase uses a Euclidean remainder and never goes negative.


Replaying a Buffer
------------------

A modulated signal has no closed form, only a sample buffer covering a known
span of time. `replay` treats that buffer as one period of a periodic
function: t is wrapped into [0, span) and mapped onto the nearest earlier
sample.
*/

use std::f64::consts::TAU;

use crate::signal::Waveform;

/// Position inside one cycle, in `[0, 1)`.
#[inline]
pub fn phase(frequency: f64, t: f64) -> f64 {
    (t * frequency).rem_euclid(1.0)
}

#[inline]
pub fn sine(frequency: f64, t: f64) -> f64 {
    (TAU * frequency * t).sin()
}

#[inline]
pub fn square(frequency: f64, t: f64) -> f64 {
    if sine(frequency, t) > 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
pub fn triangle(frequency: f64, t: f64) -> f64 {
    4.0 * (phase(frequency, t) - 0.5).abs() - 1.0
}

#[inline]
pub fn sawtooth(frequency: f64, t: f64) -> f64 {
    2.0 * (phase(frequency, t) - 0.5)
}

/// Evaluate a closed-form waveform. `Modulated` has no closed form and
/// evaluates to zero; use [`replay`] with its sample buffer instead.
pub fn evaluate(waveform: Waveform, frequency: f64, t: f64) -> f64 {
    match waveform {
        Waveform::Sine => sine(frequency, t),
        Waveform::Square => square(frequency, t),
        Waveform::Triangle => triangle(frequency, t),
        Waveform::Sawtooth => sawtooth(frequency, t),
        Waveform::Modulated => 0.0,
    }
}

/// Read a sample buffer spanning `span` seconds as a periodic signal.
pub fn replay(samples: &[f64], span: f64, t: f64) -> f64 {
    if samples.is_empty() || !(span > 0.0) {
        return 0.0;
    }
    let position = t.rem_euclid(span) / span;
    let index = (position * samples.len() as f64) as usize;
    samples[index.min(samples.len() - 1)]
}
