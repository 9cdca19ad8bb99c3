//! Structured chord value

use super::naming::{NamingTable, PitchClass};

/// A parsed chord symbol.
///
/// Only `root` and `overriding_root` are pitched; everything else is kept as
/// written so that printing at offset 0 reproduces the original spelling.
///
/// # Fields
/// - `root`: Pitch class of the chord root
/// - `quality`: Quality keyword as written (`""`, `"m"`, `"min"`, `"dim"`, `"aug"`, `"+"`, ...)
/// - `extended`: Extension number, including major-seventh style spellings (`"7"`, `"maj7"`, `"M9"`)
/// - `suspended`: Suspension (`"sus"`, `"sus2"`, `"sus4"`)
/// - `added`: Added tones (`"add9"`)
/// - `alterations`: Altered tones (`"b5"`, `"#9"`)
/// - `parenthesized`: Contents of a trailing parenthesized group (`"b9"` for `C7(b9)`)
/// - `overriding_root`: Bass note of a slash chord
#[derive(Debug, Clone, PartialEq)]
pub struct ChordValue {
    pub root: PitchClass,
    pub quality: String,
    pub extended: Option<String>,
    pub suspended: Option<String>,
    pub added: Vec<String>,
    pub alterations: Vec<String>,
    pub parenthesized: Option<String>,
    pub overriding_root: Option<PitchClass>,
}

impl ChordValue {
    /// A plain major triad on `root`.
    pub fn new(root: PitchClass) -> Self {
        Self {
            root,
            quality: String::new(),
            extended: None,
            suspended: None,
            added: Vec::new(),
            alterations: Vec::new(),
            parenthesized: None,
            overriding_root: None,
        }
    }

    /// Transpose root and bass by `semitones`. Correct modulo 12 for any value.
    pub fn transpose(&self, semitones: i32) -> Self {
        Self {
            root: self.root.transpose(semitones),
            overriding_root: self.overriding_root.map(|bass| bass.transpose(semitones)),
            ..self.clone()
        }
    }

    /// Copy of this chord with only root and quality kept.
    pub fn simplified(&self) -> Self {
        Self {
            quality: self.quality.clone(),
            ..Self::new(self.root)
        }
    }

    /// Render with the given naming table.
    pub fn pretty_print(&self, naming: &NamingTable) -> String {
        let mut out = String::from(naming.name(self.root));
        out.push_str(&self.quality);
        if let Some(extended) = &self.extended {
            out.push_str(extended);
        }
        if let Some(suspended) = &self.suspended {
            out.push_str(suspended);
        }
        for alteration in &self.alterations {
            out.push_str(alteration);
        }
        for added in &self.added {
            out.push_str(added);
        }
        if let Some(group) = &self.parenthesized {
            out.push('(');
            out.push_str(group);
            out.push(')');
        }
        if let Some(bass) = self.overriding_root {
            out.push('/');
            out.push_str(naming.name(bass));
        }
        out
    }
}
