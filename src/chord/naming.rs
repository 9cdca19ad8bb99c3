//! Pitch classes and enharmonic naming tables.
//!
//! Pitch classes are indexed from `A` (0) up to `G#`/`Ab` (11), the same
//! indexing the naming tables use.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Display names for pitch classes 0..11 using sharps.
pub const SHARP_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Display names for pitch classes 0..11 using flats.
pub const FLAT_NAMES: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

/// One of the twelve pitch classes, 0 = A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any integer, wrapping modulo 12.
    pub fn new(value: i32) -> Self {
        Self(value.rem_euclid(12) as u8)
    }

    /// Pitch class for a note letter (either case) and an accidental offset
    /// (`+1` sharp, `-1` flat).
    pub fn from_letter(letter: char, accidental: i32) -> Option<Self> {
        let base = match letter.to_ascii_uppercase() {
            'A' => 0,
            'B' => 2,
            'C' => 3,
            'D' => 5,
            'E' => 7,
            'F' => 8,
            'G' => 10,
            _ => return None,
        };
        Some(Self::new(base + accidental))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Move by any number of semitones, up or down.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }
}

/// Ordered pitch-class-to-name mapping with exactly 12 distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTable {
    names: Vec<String>,
}

impl NamingTable {
    /// Build a custom table.
    ///
    /// # Errors
    /// Returns [`SheetError::InvalidNamingTable`] unless `names` holds exactly
    /// 12 non-empty, distinct entries.
    pub fn new(names: Vec<String>) -> Result<Self, SheetError> {
        if names.len() != 12 {
            return Err(SheetError::InvalidNamingTable(format!(
                "expected 12 names, got {}",
                names.len()
            )));
        }
        if let Some(empty) = names.iter().position(|n| n.is_empty()) {
            return Err(SheetError::InvalidNamingTable(format!(
                "name for pitch class {} is empty",
                empty
            )));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(SheetError::InvalidNamingTable(format!(
                    "'{}' appears more than once",
                    name
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn sharps() -> Self {
        Self::from_static(&SHARP_NAMES)
    }

    pub fn flats() -> Self {
        Self::from_static(&FLAT_NAMES)
    }

    fn from_static(names: &[&str; 12]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn name(&self, pitch: PitchClass) -> &str {
        &self.names[pitch.index()]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Which built-in table chord names are printed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStyle {
    #[default]
    Sharps,
    Flats,
}

impl NamingStyle {
    pub fn table(self) -> NamingTable {
        match self {
            NamingStyle::Sharps => NamingTable::sharps(),
            NamingStyle::Flats => NamingTable::flats(),
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStyle::Sharps => write!(f, "sharps"),
            NamingStyle::Flats => write!(f, "flats"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_wraps_both_directions() {
        let c = PitchClass::from_letter('C', 0).unwrap();
        assert_eq!(c.index(), 3);
        assert_eq!(c.transpose(12), c);
        assert_eq!(c.transpose(-12), c);
        assert_eq!(c.transpose(-4).index(), 11); // G#/Ab
        assert_eq!(c.transpose(25).index(), 4); // C#/Db
    }

    #[test]
    fn test_enharmonic_letters_share_pitch_class() {
        assert_eq!(
            PitchClass::from_letter('C', 1),
            PitchClass::from_letter('D', -1)
        );
        assert_eq!(
            PitchClass::from_letter('B', 1),
            PitchClass::from_letter('C', 0)
        );
        assert_eq!(PitchClass::from_letter('H', 0), None);
    }

    #[test]
    fn test_builtin_tables() {
        let c_sharp = PitchClass::from_letter('C', 1).unwrap();
        assert_eq!(NamingTable::sharps().name(c_sharp), "C#");
        assert_eq!(NamingTable::flats().name(c_sharp), "Db");
        assert_eq!(NamingStyle::Flats.table(), NamingTable::flats());
    }

    #[test]
    fn test_custom_table_validation() {
        let short: Vec<String> = SHARP_NAMES[..11].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            NamingTable::new(short),
            Err(SheetError::InvalidNamingTable(_))
        ));

        let mut duplicated: Vec<String> = SHARP_NAMES.iter().map(|s| s.to_string()).collect();
        duplicated[1] = "A".to_string();
        assert!(NamingTable::new(duplicated).is_err());

        let german: Vec<String> = [
            "A", "B", "H", "C", "Cis", "D", "Dis", "E", "F", "Fis", "G", "Gis",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let table = NamingTable::new(german).unwrap();
        assert_eq!(table.name(PitchClass::new(2)), "H");
    }
}
