use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Fixed set of behavioural observation categories, in button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationLabel {
    Scratch,
    Sniff,
    TailWag,
    Door,
    Down,
    GetsUp,
    WeightShift,
    Sit,
    Other,
}

impl ObservationLabel {
    pub const ALL: [ObservationLabel; 9] = [
        Self::Scratch,
        Self::Sniff,
        Self::TailWag,
        Self::Door,
        Self::Down,
        Self::GetsUp,
        Self::WeightShift,
        Self::Sit,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scratch => "Scratch",
            Self::Sniff => "Sniff",
            Self::TailWag => "TailWag",
            Self::Door => "Door",
            Self::Down => "Down",
            Self::GetsUp => "GetsUp",
            Self::WeightShift => "WeightShift",
            Self::Sit => "Sit",
            Self::Other => "Other",
        }
    }

    /// 1-based position of the label on the button bar.
    pub fn button_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|l| l == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Exact wire name only (as stored in the `events` key).
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }

    /// Lenient operator input: name in any case, `tail-wag` / `tail_wag`,
    /// or the 1-based button index.
    pub fn parse_input(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(idx) = s.parse::<usize>() {
            return idx
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i))
                .copied();
        }

        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().to_lowercase() == folded)
    }
}

impl fmt::Display for ObservationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_input(s).ok_or_else(|| AppError::InvalidLabel(s.to_string()))
    }
}
