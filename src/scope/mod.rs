//! Oscilloscope rendering engine.
//!
//! Computes what an oscilloscope screen shows (graticule, scales, labels and
//! the trace polyline) without touching any drawing API. A host turns a
//! [`ScopeFrame`] into pixels, character cells or anything else.

/*
Reading the Screen
==================

The screen is a fixed 500 × 300 px surface divided into 10 × 8 divisions.
Zoom shrinks the logical area that maps onto it, per axis:

    logical_width  = 500 / zoom_x
    logical_height = 300 / zoom_y

VERTICAL   5 px per volt in logical space, so

               volts/div = (logical_height / 8) / 5

           At zoom 1 that is 7.5 V/div, ±30 V full scale.

HORIZONTAL three cycles of the input fill the screen at zoom 1:

               window    = (3 / frequency) / zoom_x
               time/div  = window / 10

           Digital inputs have no frequency, so no time base.


Analog vs. Digital
------------------

ANALOG   Animated. Every frame adds the real time since the previous frame
         (capped at 100 ms, so a stall does not fling the trace) to a phase
         accumulator, and the trace is evaluated over [-phase, window-phase].
         The result scrolls. 2 points per logical pixel.

DIGITAL  Drawn once. The bits share the width equally; a 1 sits at 20%
         from the top, a 0 at 80%, with vertical edges between them.


Frame Scheduling
----------------

Each oscilloscope owns a single-slot FrameScheduler. Any change of input,
zoom or pause state cancels the pending frame and arms exactly one new one.
A running analog frame arms its successor; pausing just stops doing so.
Nothing ever stacks up, and a superseded frame can never draw.
*/

/// Graticule geometry and labels.
pub mod grid;
/// The per-instance oscilloscope state machine.
pub mod oscilloscope;
/// Single-slot frame scheduler.
pub mod scheduler;
/// Trace polylines for analog and digital inputs.
pub mod trace;
/// Per-axis zoom and wheel handling.
pub mod zoom;

pub use grid::{format_time, Grid, Label, Surface};
pub use oscilloscope::{Oscilloscope, ScopeFrame};
pub use scheduler::FrameScheduler;
pub use trace::{Trace, TraceKind};
pub use zoom::{WheelInput, Zoom};

pub const DIVISIONS_X: usize = 10;
pub const DIVISIONS_Y: usize = 8;
pub const PIXELS_PER_VOLT: f64 = 5.0;
pub const CYCLES_ON_SCREEN: f64 = 3.0;
pub const OVERSAMPLE_FACTOR: f64 = 2.0;
/// Largest phase step one frame may take, in seconds.
pub const MAX_FRAME_STEP: f64 = 0.1;
/// Carrier cycles per symbol assumed for modulated records until the scope
/// is told otherwise; records do not carry their framing.
pub const DEFAULT_CYCLES_PER_SYMBOL: f64 = 3.0;
