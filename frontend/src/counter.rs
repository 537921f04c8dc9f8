//! Count-up animation for statistic numerals.

pub const DEFAULT_STEPS: u32 = 50;
pub const DEFAULT_INTERVAL_MS: u32 = 30;

/// Parses the leading integer of a numeral's text.
///
/// Surrounding whitespace is ignored and trailing decoration (`"250+"`,
/// `"98%"`) is dropped. Text that doesn't start with a digit after an
/// optional sign returns `None`.
pub fn parse_target(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    /// Intermediate value to display.
    Step(i64),
    /// Final value; the ticker must stop.
    Finished(i64),
}

impl CounterFrame {
    pub fn value(self) -> i64 {
        match self {
            CounterFrame::Step(v) | CounterFrame::Finished(v) => v,
        }
    }
}

/// Linear count from 0 to `target` in `target / steps` increments.
#[derive(Debug, Clone)]
pub struct Counter {
    target: i64,
    current: f64,
    increment: f64,
    finished: bool,
}

impl Counter {
    pub fn new(target: i64, steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            target,
            current: 0.0,
            increment: target as f64 / f64::from(steps),
            finished: false,
        }
    }

    pub fn from_text(text: &str, steps: u32) -> Option<Self> {
        parse_target(text).map(|target| Self::new(target, steps))
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one interval. Returns `None` once the final frame was produced.
    pub fn tick(&mut self) -> Option<CounterFrame> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.finished = true;
            Some(CounterFrame::Finished(self.target))
        } else {
            Some(CounterFrame::Step(self.current.floor() as i64))
        }
    }
}

impl Iterator for Counter {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<CounterFrame> {
        self.tick()
    }
}
