use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use lightcycle_sim::{Direction, HeldDirections};

/// One tape step: hold these directions for `ticks` ticks.
#[derive(Debug, Clone, Deserialize)]
pub struct TapeStep {
    #[serde(default)]
    pub hold: Vec<Direction>,
    #[serde(default = "one_tick")]
    pub ticks: u32,
}

fn one_tick() -> u32 {
    1
}

/// Scripted input, expanded to one sample per tick.
#[derive(Debug, Clone, Default)]
pub struct InputTape {
    frames: Vec<HeldDirections>,
}

impl InputTape {
    pub fn from_steps(steps: &[TapeStep]) -> Self {
        let frames = steps
            .iter()
            .flat_map(|step| {
                let held = HeldDirections::from_directions(&step.hold);
                std::iter::repeat_n(held, step.ticks as usize)
            })
            .collect();
        Self { frames }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let steps: Vec<TapeStep> = serde_json::from_str(text)?;
        Ok(Self::from_steps(&steps))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Input for `tick` (0-based); nothing is held past the end.
    pub fn frame(&self, tick: usize) -> HeldDirections {
        self.frames.get(tick).copied().unwrap_or(HeldDirections::NONE)
    }
}

/// Chance per tick that the wanderer holds a direction at all.
const WANDER_HOLD_CHANCE: f64 = 0.08;

/// Seeded random input source.
pub struct Wanderer {
    rng: StdRng,
}

impl Wanderer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_frame(&mut self) -> HeldDirections {
        if !self.rng.random_bool(WANDER_HOLD_CHANCE) {
            return HeldDirections::NONE;
        }
        let direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
        HeldDirections::only(direction)
    }
}

/// Where each tick's input comes from.
pub enum InputSource {
    Tape(InputTape),
    Wander(Wanderer),
}

impl InputSource {
    pub fn frame(&mut self, tick: usize) -> HeldDirections {
        match self {
            InputSource::Tape(tape) => tape.frame(tick),
            InputSource::Wander(wanderer) => wanderer.next_frame(),
        }
    }
}
