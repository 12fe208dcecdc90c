//! Event records and the column assignments produced for them.

use serde::{Deserialize, Serialize};

/// A single calendar entry, positioned in minutes from the start of the day (9 AM).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Minutes elapsed since 9 AM
    pub starts_at: u32,
    /// Length in minutes
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Layout-only slot: takes part in overlap resolution but is never drawn
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl Event {
    pub fn new(starts_at: u32, duration: u32) -> Self {
        Self {
            starts_at,
            duration,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    /// End of the event in minutes from 9 AM. Widened so that no input can overflow.
    pub fn ends_at(&self) -> u64 {
        u64::from(self.starts_at) + u64::from(self.duration)
    }

    pub fn overlaps(&self, other: &Event) -> bool {
        u64::from(self.starts_at) < other.ends_at() && u64::from(other.starts_at) < self.ends_at()
    }

    /// Bold heading for the event block: title, location, or `title/location`.
    /// Empty strings count as missing.
    pub fn heading(&self) -> Option<String> {
        let title = self.title.as_deref().filter(|t| !t.is_empty());
        let location = self.location.as_deref().filter(|l| !l.is_empty());
        match (title, location) {
            (Some(t), Some(l)) => Some(format!("{}/{}", t, l)),
            (Some(t), None) => Some(t.to_string()),
            (None, Some(l)) => Some(l.to_string()),
            (None, None) => None,
        }
    }
}

/// Column assignment for one event, as computed by an overlap resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSlot {
    /// Index of the event in the input list
    pub id: usize,
    /// Number of equal-width columns shared by the overlapping group
    pub width_multiplier: u32,
    /// Column index within the group, in `0..width_multiplier`
    pub offset: u32,
}
