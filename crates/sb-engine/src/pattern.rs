//! The fixed four-beat percussion pattern.

/// Beats per pattern cycle.
pub const PATTERN_LENGTH: u64 = 4;

/// A percussion voice to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Low sine thump.
    Kick,
    /// Short high-passed noise burst.
    Hat,
}

/// Kick on beats 0 and 2 of every four, hat on every beat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeatPattern;

impl BeatPattern {
    /// Whether the low trigger fires on `beat`.
    pub fn low_fires(beat: u64) -> bool {
        matches!(beat % PATTERN_LENGTH, 0 | 2)
    }

    /// Whether the high trigger fires on `beat`.
    pub fn high_fires(_beat: u64) -> bool {
        true
    }
}
