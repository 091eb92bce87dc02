//! Terminal stand-in for the vibration motor.

use std::io::Write;

use shared::domain::BuzzSignal;
use tracing::debug;

// Waveforms alternate off/on durations in milliseconds, starting with "off".
const CORRECT_PATTERN: &[u64] = &[100, 100, 100, 100, 100, 100];
const PANIC_PATTERN: &[u64] = &[0, 200];
const ROUND_OVER_PATTERN: &[u64] = &[0, 2000];
const NO_BUZZ_PATTERN: &[u64] = &[0];

pub fn pattern(signal: BuzzSignal) -> &'static [u64] {
    match signal {
        BuzzSignal::Correct => CORRECT_PATTERN,
        BuzzSignal::CountdownPanic => PANIC_PATTERN,
        BuzzSignal::RoundOver => ROUND_OVER_PATTERN,
        BuzzSignal::None => NO_BUZZ_PATTERN,
    }
}

/// One `b`+`z…` burst per "on" segment, a `z` per 100 ms (capped).
pub fn render_pattern(pattern: &[u64]) -> String {
    pattern
        .iter()
        .skip(1)
        .step_by(2)
        .filter(|ms| **ms > 0)
        .map(|ms| format!("b{}", "z".repeat((ms / 100).clamp(1, 20) as usize)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy)]
pub struct Buzzer {
    bell: bool,
}

impl Buzzer {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    pub fn buzz(&self, signal: BuzzSignal) {
        let pattern = pattern(signal);
        let rendered = render_pattern(pattern);
        debug!(?signal, ?pattern, "buzz: playing pattern");
        if rendered.is_empty() {
            return;
        }

        let mut out = std::io::stdout().lock();
        if self.bell {
            let _ = write!(out, "\x07");
        }
        let _ = writeln!(out, "  *{rendered}*");
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_pattern_has_three_short_pulses() {
        assert_eq!(render_pattern(pattern(BuzzSignal::Correct)), "bz bz bz");
    }

    #[test]
    fn round_over_is_one_long_pulse() {
        let rendered = render_pattern(pattern(BuzzSignal::RoundOver));
        assert_eq!(rendered, format!("b{}", "z".repeat(20)));
        assert_eq!(render_pattern(pattern(BuzzSignal::CountdownPanic)), "bzz");
    }

    #[test]
    fn no_buzz_renders_nothing() {
        assert_eq!(render_pattern(pattern(BuzzSignal::None)), "");
    }
}
