//! Roll engine
//!
//! Draws dice values and drives roll sessions. A session is advanced one
//! tick at a time by the caller; every tick regenerates the full set of
//! values, which is what produces the "tumbling" effect on screen.

use super::RollError;
use rand::Rng;

/// Highest number of dice that can be rolled at once
pub const MAX_DICE: u32 = 15;

/// Number of regenerations a single roll performs before it settles
pub const DEFAULT_SINGLE_ROLL_TICKS: u32 = 25;

/// Dropdown selections as made by the user (either may still be unset)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub faces: Option<u32>,
    pub dice: Option<u32>,
}

impl Selection {
    /// Parameters for a roll, or an error if either selection is missing
    pub fn params(&self) -> Result<RollParams, RollError> {
        match (self.faces, self.dice) {
            (Some(faces), Some(dice)) => RollParams::new(faces, dice),
            _ => Err(RollError::MissingParameters),
        }
    }
}

/// Validated roll parameters, captured when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollParams {
    faces: u32,
    dice: u32,
}

impl RollParams {
    pub fn new(faces: u32, dice: u32) -> Result<Self, RollError> {
        if faces < 2 {
            return Err(RollError::InvalidFaces(faces));
        }
        if !(1..=MAX_DICE).contains(&dice) {
            return Err(RollError::InvalidDice(dice));
        }
        Ok(Self { faces, dice })
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn dice(&self) -> u32 {
        self.dice
    }
}

/// Roll `params.dice` dice, each uniformly in `1..=params.faces`
pub fn draw<R: Rng>(params: RollParams, rng: &mut R) -> Vec<u32> {
    (0..params.dice)
        .map(|_| rng.random_range(1..=params.faces))
        .collect()
}

/// How a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollMode {
    /// Runs until stopped
    Continuous,
    /// Runs for a fixed number of ticks
    Single { remaining: u32 },
}

/// An active roll
#[derive(Debug, Clone)]
pub struct RollSession {
    params: RollParams,
    mode: RollMode,
    running: bool,
}

impl RollSession {
    pub fn continuous(params: RollParams) -> Self {
        Self {
            params,
            mode: RollMode::Continuous,
            running: true,
        }
    }

    pub fn single(params: RollParams, ticks: u32) -> Self {
        Self {
            params,
            mode: RollMode::Single {
                remaining: ticks.max(1),
            },
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_continuous(&self) -> bool {
        self.mode == RollMode::Continuous
    }

    /// Ask the session to stop; takes effect on the next tick
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one tick. Returns the regenerated values, or `None` once the
    /// session is no longer running.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Option<Vec<u32>> {
        if !self.running {
            return None;
        }

        let values = draw(self.params, rng);

        if let RollMode::Single { remaining } = &mut self.mode {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.running = false;
            }
        }

        Some(values)
    }
}

/// What the results row currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RollResults {
    #[default]
    Empty,
    Values(Vec<u32>),
    Warning(RollError),
}

impl RollResults {
    /// Rolled values (empty for the warning or before the first roll)
    pub fn values(&self) -> &[u32] {
        match self {
            RollResults::Values(values) => values,
            _ => &[],
        }
    }

    /// Sum of the rolled values, if there are any
    pub fn sum(&self) -> Option<u64> {
        match self {
            RollResults::Values(values) if !values.is_empty() => {
                Some(values.iter().map(|v| u64::from(*v)).sum())
            }
            _ => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, RollResults::Warning(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(faces: u32, dice: u32) -> RollParams {
        RollParams::new(faces, dice).unwrap()
    }

    #[test]
    fn test_selection_requires_both() {
        let none = Selection::default();
        assert_eq!(none.params(), Err(RollError::MissingParameters));

        let faces_only = Selection { faces: Some(6), dice: None };
        assert_eq!(faces_only.params(), Err(RollError::MissingParameters));

        let dice_only = Selection { faces: None, dice: Some(3) };
        assert_eq!(dice_only.params(), Err(RollError::MissingParameters));

        let both = Selection { faces: Some(6), dice: Some(3) };
        assert_eq!(both.params(), Ok(params(6, 3)));
    }

    #[test]
    fn test_params_bounds() {
        assert_eq!(RollParams::new(1, 3), Err(RollError::InvalidFaces(1)));
        assert_eq!(RollParams::new(6, 0), Err(RollError::InvalidDice(0)));
        assert_eq!(RollParams::new(6, 16), Err(RollError::InvalidDice(16)));
        assert!(RollParams::new(144, 15).is_ok());
    }

    #[test]
    fn test_draw_count_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(faces, dice) in &[(2, 1), (6, 15), (20, 4), (144, 15)] {
            for _ in 0..200 {
                let values = draw(params(faces, dice), &mut rng);
                assert_eq!(values.len(), dice as usize);
                assert!(values.iter().all(|v| (1..=faces).contains(v)));
            }
        }
    }

    #[test]
    fn test_draw_reaches_both_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..500 {
            for v in draw(params(2, 1), &mut rng) {
                seen[v as usize] = true;
            }
        }
        assert!(seen[1] && seen[2]);
    }

    #[test]
    fn test_single_session_stops_after_ticks() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = RollSession::single(params(6, 2), DEFAULT_SINGLE_ROLL_TICKS);

        let mut produced = 0;
        while let Some(values) = session.tick(&mut rng) {
            assert_eq!(values.len(), 2);
            produced += 1;
        }

        assert_eq!(produced, DEFAULT_SINGLE_ROLL_TICKS);
        assert!(!session.is_running());
        assert!(session.tick(&mut rng).is_none());
    }

    #[test]
    fn test_single_session_zero_ticks_still_rolls_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = RollSession::single(params(6, 1), 0);
        assert!(session.tick(&mut rng).is_some());
        assert!(session.tick(&mut rng).is_none());
    }

    #[test]
    fn test_continuous_session_runs_until_stopped() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = RollSession::continuous(params(20, 3));

        for _ in 0..1000 {
            assert!(session.tick(&mut rng).is_some());
        }
        assert!(session.is_running());

        session.stop();
        assert!(session.tick(&mut rng).is_none());
    }

    #[test]
    fn test_results_sum() {
        assert_eq!(RollResults::Empty.sum(), None);
        assert_eq!(RollResults::Values(vec![3, 4, 5]).sum(), Some(12));
        let warning = RollResults::Warning(RollError::MissingParameters);
        assert_eq!(warning.sum(), None);
        assert!(warning.values().is_empty());
        assert!(warning.is_warning());
    }
}
