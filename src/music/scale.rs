// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch and key system for composition.
//!
//! Provides pitch classes, octave-bearing pitches, the major/minor
//! modes and keys with their diatonic collections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semitone offset type
pub type Semitones = i8;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        match self {
            Note::C => 0,
            Note::Cs => 1,
            Note::D => 2,
            Note::Ds => 3,
            Note::E => 4,
            Note::F => 5,
            Note::Fs => 6,
            Note::G => 7,
            Note::Gs => 8,
            Note::A => 9,
            Note::As => 10,
            Note::B => 11,
        }
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse note from string (e.g., "C", "C#", "Db", "f#")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" | "B#" | "BS" => Some(Note::C),
            "C#" | "CS" | "DB" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" | "DS" | "EB" => Some(Note::Ds),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" | "ES" => Some(Note::F),
            "F#" | "FS" | "GB" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" | "GS" | "AB" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" | "AS" | "BB" => Some(Note::As),
            "B" | "CB" => Some(Note::B),
            _ => None,
        }
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let new_pc = (self.pitch_class() as i8 + semitones % 12).rem_euclid(12) as u8;
        Note::from_pitch_class(new_pc)
    }

    /// Get interval in semitones to another note (ascending)
    pub fn interval_to(self, other: Note) -> u8 {
        (other.pitch_class() as i16 - self.pitch_class() as i16).rem_euclid(12) as u8
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::C => write!(f, "C"),
            Note::Cs => write!(f, "C#"),
            Note::D => write!(f, "D"),
            Note::Ds => write!(f, "D#"),
            Note::E => write!(f, "E"),
            Note::F => write!(f, "F"),
            Note::Fs => write!(f, "F#"),
            Note::G => write!(f, "G"),
            Note::Gs => write!(f, "G#"),
            Note::A => write!(f, "A"),
            Note::As => write!(f, "A#"),
            Note::B => write!(f, "B"),
        }
    }
}

/// A pitch class placed in an octave (middle C = C4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub note: Note,
    pub octave: i8,
}

impl Pitch {
    pub fn new(note: Note, octave: i8) -> Self {
        Self { note, octave }
    }

    /// Absolute pitch number using MIDI convention (C4 = 60)
    pub fn midi(self) -> i16 {
        (self.octave as i16 + 1) * 12 + self.note.pitch_class() as i16
    }

    /// Build a pitch from an absolute pitch number
    pub fn from_midi(midi: i16) -> Self {
        Self {
            note: Note::from_pitch_class(midi.rem_euclid(12) as u8),
            octave: (midi.div_euclid(12) - 1) as i8,
        }
    }

    /// Transpose by semitones, carrying into neighbouring octaves
    pub fn transpose(self, semitones: i16) -> Self {
        Self::from_midi(self.midi() + semitones)
    }

    /// Move by whole octaves until the pitch lies within `[low, high]`
    pub fn clamp_octave(self, low: i8, high: i8) -> Self {
        let mut pitch = self;
        while pitch.octave < low {
            pitch = pitch.transpose(12);
        }
        while pitch.octave > high {
            pitch = pitch.transpose(-12);
        }
        pitch
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

/// Tonal modes supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    /// Natural minor (Aeolian)
    Minor,
}

impl Mode {
    /// Get the intervals (semitones from tonic) for this mode
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Parse mode from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Some(Mode::Major),
            "minor" => Some(Mode::Minor),
            _ => None,
        }
    }

    /// Lower-case identifier ("major" / "minor")
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }

    /// Get a human-readable name for this mode
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A musical key with tonic and mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Key {
    tonic: Note,
    mode: Mode,
    /// Tonic as the user wrote it ("Eb" rather than "D#")
    spelling: String,
    #[serde(skip)]
    notes: [Note; 7],
}

impl Key {
    /// Create a new key
    pub fn new(tonic: Note, mode: Mode) -> Self {
        let notes = mode.intervals().map(|i| tonic.transpose(i as Semitones));
        Self {
            tonic,
            mode,
            spelling: tonic.to_string(),
            notes,
        }
    }

    /// Create a key whose label keeps the given tonic spelling
    ///
    /// `spelling` is normalized to an upper-case letter followed by `#` or
    /// `b`, so " eb" becomes "Eb" and "cs" becomes "C#".
    pub fn spelled(tonic: Note, mode: Mode, spelling: &str) -> Self {
        let mut key = Key::new(tonic, mode);
        let mut chars = spelling.trim().chars();
        if let Some(letter) = chars.next() {
            let mut name = letter.to_ascii_uppercase().to_string();
            for c in chars {
                match c {
                    '#' | 's' | 'S' => name.push('#'),
                    'b' | 'B' => name.push('b'),
                    _ => {}
                }
            }
            key.spelling = name;
        }
        key
    }

    /// Parse a key from strings (e.g., "F#", "minor")
    pub fn parse(tonic_str: &str, mode_str: &str) -> Option<Self> {
        let tonic = Note::from_str(tonic_str)?;
        let mode = Mode::from_str(mode_str)?;
        Some(Key::spelled(tonic, mode, tonic_str))
    }

    /// Get the tonic note
    pub fn tonic(&self) -> Note {
        self.tonic
    }

    /// Tonic name used in labels and titles
    pub fn tonic_name(&self) -> &str {
        &self.spelling
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Ordered diatonic pitch classes, tonic first
    pub fn scale(&self) -> &[Note] {
        &self.notes
    }

    /// Get the scale degree (1-based) for a note, if it's in the key
    pub fn degree_of(&self, note: Note) -> Option<usize> {
        self.notes.iter().position(|&n| n == note).map(|i| i + 1)
    }

    /// The tonic placed in `octave`
    pub fn tonic_pitch(&self, octave: i8) -> Pitch {
        Pitch::new(self.tonic, octave)
    }

    /// The diatonic collection ascending from the tonic in `octave`,
    /// closed by the tonic an octave higher (eight pitches)
    pub fn scale_pitches(&self, octave: i8) -> Vec<Pitch> {
        let base = self.tonic_pitch(octave);
        self.mode
            .intervals()
            .iter()
            .map(|&i| base.transpose(i as i16))
            .chain(std::iter::once(base.transpose(12)))
            .collect()
    }

    /// Label such as "C major"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.spelling, self.mode)
    }
}
