use std::{convert::Infallible, fmt, str::FromStr};

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

/// Source of uniformly distributed integers driving maze generation.
///
/// Generators only ever talk to this trait, so the exact sequence of calls
/// and their bounds is what makes a maze reproducible.
pub trait IntSource {
    /// Returns an integer in `min..=max`.
    fn next_int(&mut self, min: i32, max: i32) -> i32;
}

/// Seed of a generation, numbers and text both hash into [`XorShift32`] state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(i64),
    Text(String),
}

impl Seed {
    /// Upper bound (exclusive) of seeds picked when none is given.
    pub const RANDOM_LIMIT: i64 = 100_000;

    pub fn random() -> Self {
        Seed::Number(thread_rng().gen_range(0..Self::RANDOM_LIMIT))
    }
}

impl From<i64> for Seed {
    fn from(n: i64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

/// Integers become [`Seed::Number`], anything else is taken as text.
impl FromStr for Seed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse()
            .map(Seed::Number)
            .unwrap_or_else(|_| Seed::Text(s.to_string())))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// 32-bit xorshift generator.
///
/// Seeding and the integer mapping are fixed bit for bit: a seed always yields
/// the same stream, so mazes shared by seed stay identical everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    seed: i32,
    state: i32,
}

impl XorShift32 {
    pub fn new(seed: &Seed) -> Self {
        match seed {
            Seed::Number(n) => Self::from_number(*n),
            Seed::Text(s) => Self::from_text(s),
        }
    }

    pub fn from_number(n: i64) -> Self {
        // zero is a fixed point of xorshift
        Self::from_state(if n == 0 { 1 } else { n as i32 })
    }

    pub fn from_text(text: &str) -> Self {
        let mut hash: i32 = 0;
        for unit in text.encode_utf16() {
            hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
            hash = xorshift(hash);
        }

        Self::from_state(if hash == 0 { 1 } else { hash })
    }

    fn from_state(state: i32) -> Self {
        XorShift32 { seed: state, state }
    }

    /// Rewinds to the state right after seeding.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }

    fn advance(&mut self) -> i32 {
        self.state = xorshift(self.state);
        self.state
    }
}

fn xorshift(mut value: i32) -> i32 {
    value ^= value << 13;
    value ^= value >> 17;
    value ^= value << 5;
    value
}

impl IntSource for XorShift32 {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let state = f64::from(self.advance());
        let unit = (state - f64::from(i32::MIN)) / (f64::from(i32::MAX) - f64::from(i32::MIN));
        let value = (unit * (f64::from(max) + 1.0 - f64::from(min)) + f64::from(min)).floor();

        // the state can hit `i32::MAX` exactly, which would map one past `max`
        (value as i32).min(max)
    }
}

/// Lets any [`rand::Rng`] drive generation.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> IntSource for RngSource<R> {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        self.0.gen_range(min..=max)
    }
}
