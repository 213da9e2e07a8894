// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ambient sound catalog.

/// An ambient sound the user can pick for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeditationSound {
    /// Display name, also sent as `sound_used`
    pub name: &'static str,
    /// True for the "No Sound" entry
    pub silent: bool,
}

impl MeditationSound {
    /// Label to record with a session, `None` when nothing was playing.
    pub fn label(&self) -> Option<&'static str> {
        if self.silent {
            None
        } else {
            Some(self.name)
        }
    }
}

/// Available sounds, in picker order. Index 0 is the default.
pub static SOUND_CATALOG: [MeditationSound; 4] = [
    MeditationSound {
        name: "No Sound",
        silent: true,
    },
    MeditationSound {
        name: "White Waterfall",
        silent: false,
    },
    MeditationSound {
        name: "Ocean Waves",
        silent: false,
    },
    MeditationSound {
        name: "Rain",
        silent: false,
    },
];

/// Sound at `index`, falling back to the default entry when out of range.
pub fn sound_at(index: usize) -> &'static MeditationSound {
    SOUND_CATALOG.get(index).unwrap_or(&SOUND_CATALOG[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_entry_has_no_label() {
        assert_eq!(sound_at(0).label(), None);
        assert_eq!(sound_at(3).label(), Some("Rain"));
    }

    #[test]
    fn test_out_of_range_falls_back_to_default() {
        assert_eq!(sound_at(42), &SOUND_CATALOG[0]);
    }
}
