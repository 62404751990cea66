//! Bit payloads and their normalization to `0`/`1` sequences.
//!
//! A message reaches the modulator in whatever form its producer chose: the
//! digital generator sends a bit string, the remote service echoes integer
//! lists, and hand-built signals may carry booleans or a plain number. All of
//! them collapse to the same `Vec<u8>` of zeros and ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw bit-bearing payload as carried by a digital signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitPayload {
    /// `"10110010"`
    Text(String),
    /// `[true, false, true]`
    Flags(Vec<bool>),
    /// `[1, 0, 1]` or voltage levels `[5.0, 0.0, 5.0]`
    Levels(Vec<f64>),
    /// Anything else: a bare number, a boolean, a mixed list.
    Other(Value),
}

impl BitPayload {
    /// Normalize for modulation: truthy entries become `1`; in strings only
    /// the character `'1'` counts; scalars are read through their digit form.
    pub fn to_bits(&self) -> Vec<u8> {
        match self {
            BitPayload::Text(text) => text_bits(text),
            BitPayload::Flags(flags) => flags.iter().map(|&b| b as u8).collect(),
            BitPayload::Levels(levels) => levels.iter().map(|&v| truthy_number(v)).collect(),
            BitPayload::Other(value) => match value {
                Value::Number(n) => text_bits(&n.to_string()),
                Value::Bool(b) => text_bits(&b.to_string()),
                Value::String(s) => text_bits(s),
                Value::Array(items) => items.iter().map(|v| truthy_value(v) as u8).collect(),
                Value::Null | Value::Object(_) => Vec::new(),
            },
        }
    }

    /// Normalize for display. Same as [`to_bits`](Self::to_bits) except that a
    /// string containing anything besides `0`/`1` is read digit by digit, so
    /// `"0123"` shows as low, high, high, high.
    pub fn to_display_bits(&self) -> Vec<u8> {
        match self {
            BitPayload::Text(text) if !is_binary_text(text) => text
                .chars()
                .map(|ch| ch.to_digit(10).map_or(0, |d| (d != 0) as u8))
                .collect(),
            _ => self.to_bits(),
        }
    }

    /// Short human readable form used by instrument readouts.
    pub fn describe(&self) -> String {
        match self {
            BitPayload::Text(text) => text.clone(),
            BitPayload::Other(value) => value.to_string(),
            _ => self.to_bits().iter().map(|b| if *b == 1 { '1' } else { '0' }).collect(),
        }
    }
}

impl From<&str> for BitPayload {
    fn from(text: &str) -> Self {
        BitPayload::Text(text.to_string())
    }
}

impl From<Vec<bool>> for BitPayload {
    fn from(flags: Vec<bool>) -> Self {
        BitPayload::Flags(flags)
    }
}

impl From<Vec<u8>> for BitPayload {
    fn from(bits: Vec<u8>) -> Self {
        BitPayload::Levels(bits.into_iter().map(f64::from).collect())
    }
}

/// Normalize an optional payload. Absent payloads normalize to nothing.
pub fn normalize(payload: Option<&BitPayload>) -> Vec<u8> {
    payload.map(BitPayload::to_bits).unwrap_or_default()
}

/// An empty message keys a single `1` symbol, so the modulator always emits
/// at least one symbol of carrier.
pub fn or_single_mark(bits: Vec<u8>) -> Vec<u8> {
    if bits.is_empty() {
        vec![1]
    } else {
        bits
    }
}

fn text_bits(text: &str) -> Vec<u8> {
    text.chars().map(|ch| (ch == '1') as u8).collect()
}

fn is_binary_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch == '0' || ch == '1')
}

fn truthy_number(v: f64) -> u8 {
    (v != 0.0 && !v.is_nan()) as u8
}

fn truthy_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
