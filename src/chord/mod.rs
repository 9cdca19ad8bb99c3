//! # Chord Module
//!
//! Parse, transpose and print chord symbols.
//!
//! ## Sub-modules
//! - `naming` - Pitch classes and the sharps/flats naming tables
//! - `types` - The structured [`ChordValue`]
//! - `parser` - Chord symbol grammar
//!
//! ## Example
//! ```rust
//! use chordsheet::chord::{parse_chord, NamingTable};
//!
//! let chord = parse_chord("C#m7").unwrap();
//! let up = chord.transpose(1);
//! assert_eq!(up.pretty_print(&NamingTable::sharps()), "Dm7");
//!
//! let down = chord.transpose(-3);
//! assert_eq!(down.pretty_print(&NamingTable::flats()), "Bbm7");
//! assert_eq!(down.simplified().pretty_print(&NamingTable::flats()), "Bbm");
//! ```

mod naming;
mod parser;
mod types;


pub use naming::{NamingStyle, NamingTable, PitchClass, FLAT_NAMES, SHARP_NAMES};
pub use parser::{is_no_chord, parse_chord};
pub use types::ChordValue;
