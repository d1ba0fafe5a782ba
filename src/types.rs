//! Core data types for dicebox
//!
//! Selection options and the focusable controls of the main screen.

use crate::roll::engine::MAX_DICE;
use crate::roll::RollError;

/// Face counts offered by default
pub const DEFAULT_FACE_OPTIONS: &[u32] = &[
    2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 15, 16, 18, 20, 21, 22, 25, 28, 30, 35, 36, 40, 42, 44,
    45, 48, 49, 50, 55, 56, 60, 62, 70, 72, 75, 79, 80, 81, 82, 83, 84, 85, 86, 87, 88, 90, 92,
    94, 95, 96, 98, 100, 101, 102, 103, 105, 110, 111, 112, 116, 120, 121, 122, 123, 124, 125,
    130, 131, 132, 135, 140, 144,
];

/// The list of face counts a user may pick from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceOptions(Vec<u32>);

impl Default for FaceOptions {
    fn default() -> Self {
        Self(DEFAULT_FACE_OPTIONS.to_vec())
    }
}

impl FaceOptions {
    /// Build from a user supplied list: drops values below 2, sorts and
    /// dedups. Falls back to the defaults if nothing usable remains.
    pub fn from_list(list: &[u32]) -> Self {
        let mut faces: Vec<u32> = list.iter().copied().filter(|f| *f >= 2).collect();
        faces.sort_unstable();
        faces.dedup();

        if faces.is_empty() {
            Self::default()
        } else {
            Self(faces)
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Check that a face count is one of the options
    pub fn validate(&self, faces: u32) -> Result<u32, RollError> {
        if self.0.contains(&faces) {
            Ok(faces)
        } else {
            Err(RollError::InvalidFaces(faces))
        }
    }
}

/// Die counts offered (1..=15)
pub fn die_options() -> Vec<u32> {
    (1..=MAX_DICE).collect()
}

/// Check that a die count is in range
pub fn validate_dice(dice: u32) -> Result<u32, RollError> {
    if (1..=MAX_DICE).contains(&dice) {
        Ok(dice)
    } else {
        Err(RollError::InvalidDice(dice))
    }
}

/// Which dropdown a popup belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Faces,
    Dice,
}

impl Dropdown {
    pub fn label(&self) -> &'static str {
        match self {
            Dropdown::Faces => "Faces",
            Dropdown::Dice => "Dice",
        }
    }
}

/// Focusable controls, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Faces,
    Dice,
    Store,
    Clear,
    RollOnce,
    Roll,
    Sums,
}

impl Control {
    pub fn all() -> &'static [Control] {
        &[
            Control::Faces,
            Control::Dice,
            Control::Store,
            Control::Clear,
            Control::RollOnce,
            Control::Roll,
            Control::Sums,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Control::Faces => 0,
            Control::Dice => 1,
            Control::Store => 2,
            Control::Clear => 3,
            Control::RollOnce => 4,
            Control::Roll => 5,
            Control::Sums => 6,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Control::Faces,
            1 => Control::Dice,
            2 => Control::Store,
            3 => Control::Clear,
            4 => Control::RollOnce,
            5 => Control::Roll,
            6 => Control::Sums,
            _ => Control::Faces,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    pub fn prev(&self) -> Self {
        let len = Self::all().len();
        Self::from_index((self.index() + len - 1) % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_options_from_list() {
        let opts = FaceOptions::from_list(&[20, 6, 1, 6, 0, 100]);
        assert_eq!(opts.as_slice(), &[6, 20, 100]);

        let fallback = FaceOptions::from_list(&[0, 1]);
        assert_eq!(fallback, FaceOptions::default());
    }

    #[test]
    fn test_face_options_validate() {
        let opts = FaceOptions::default();
        assert_eq!(opts.validate(20), Ok(20));
        assert_eq!(opts.validate(13), Err(RollError::InvalidFaces(13)));
        assert_eq!(opts.as_slice().first(), Some(&2));
        assert_eq!(opts.as_slice().len(), DEFAULT_FACE_OPTIONS.len());
    }

    #[test]
    fn test_die_options() {
        let dice = die_options();
        assert_eq!(dice.first(), Some(&1));
        assert_eq!(dice.last(), Some(&15));
        assert_eq!(validate_dice(0), Err(RollError::InvalidDice(0)));
        assert_eq!(validate_dice(15), Ok(15));
    }

    #[test]
    fn test_control_cycle() {
        let mut control = Control::Faces;
        for _ in 0..Control::all().len() {
            control = control.next();
        }
        assert_eq!(control, Control::Faces);
        assert_eq!(Control::Faces.prev(), Control::Sums);
        assert_eq!(Control::Sums.next(), Control::Faces);
    }
}
