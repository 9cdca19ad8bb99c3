//! # Error Types
//!
//! This module defines the error types for chord sheet processing.
//!
//! ## Error Types
//! - `SheetError` - Contract violations and I/O failures surfaced to callers
//! - `ChordError` - A single chord token that could not be parsed
//!
//! `ChordError` never crosses the body-level transform: the transposition
//! engine catches it per token and leaves that token as written.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{transpose_tagged_body, NamingTable, SheetError};
//!
//! let naming = NamingTable::sharps();
//! match transpose_tagged_body("[ch]C[/ch]", 13, &naming, false) {
//!     Err(SheetError::OffsetOutOfRange(n)) => eprintln!("offset {} is out of range", n),
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(body) => println!("{}", body),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    /// Semitone offset outside `[-12, 12]`.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::OffsetOutOfRange(14);
    /// assert_eq!(err.to_string(), "Semitone offset 14 is outside -12..=12");
    /// ```
    #[error("Semitone offset {0} is outside -12..=12")]
    OffsetOutOfRange(i32),

    /// A naming table that does not hold exactly 12 distinct names.
    #[error("Invalid naming table: {0}")]
    InvalidNamingTable(String),

    /// Invalid setlist document.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::Metadata("songs must be a list".to_string());
    /// assert_eq!(err.to_string(), "Invalid setlist: songs must be a list");
    /// ```
    #[error("Invalid setlist: {0}")]
    Metadata(String),

    #[error("No song with id '{0}' in the setlist")]
    UnknownSong(String),

    #[error("Could not access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document generation failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Generated document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Failure to read a chord symbol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    #[error("Empty chord symbol")]
    Empty,

    #[error("'{0}' does not start with a note name")]
    InvalidRoot(String),

    #[error("Unrecognized text '{rest}' in chord '{chord}'")]
    UnexpectedDescriptor { chord: String, rest: String },

    #[error("'{0}' is not a valid bass note")]
    InvalidBass(String),
}
