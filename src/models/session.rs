// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Completed meditation session, as recorded client-side and sent to the backend.

use crate::models::UserId;
use serde::Serialize;
use validator::Validate;

/// A finished session before it is bound to a user.
///
/// Validated before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewSession {
    /// Length of the session in seconds
    #[validate(range(min = 1, message = "duration must be at least one second"))]
    pub duration_seconds: u32,
    /// Self-reported focus, 1 (scattered) to 5 (deep)
    #[validate(range(min = 1, max = 5, message = "focus rating must be between 1 and 5"))]
    pub focus_rating: Option<u8>,
    /// Ambient sound label, if one was playing
    #[validate(length(min = 1, message = "sound label must not be empty"))]
    pub sound_used: Option<String>,
}

impl NewSession {
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            focus_rating: None,
            sound_used: None,
        }
    }

    pub fn with_focus_rating(mut self, rating: u8) -> Self {
        self.focus_rating = Some(rating);
        self
    }

    pub fn with_sound(mut self, label: impl Into<String>) -> Self {
        self.sound_used = Some(label.into());
        self
    }

    /// Bind to a resolved user, producing the wire payload.
    pub fn into_session(self, user_id: UserId) -> MeditationSession {
        MeditationSession {
            user_id,
            duration_seconds: self.duration_seconds,
            focus_rating: self.focus_rating,
            sound_used: self.sound_used,
        }
    }
}

/// Body of `POST /meditation/sessions`.
///
/// Absent optional fields are omitted from the JSON, never sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeditationSession {
    pub user_id: UserId,
    /// Wire name: `duration`
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_used: Option<String>,
}
