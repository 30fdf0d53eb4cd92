use serde::{Serialize, Deserialize};
use validator::ValidationError;

/// A single wheel entrant. Identity is positional: duplicate display
/// names are allowed and count as separate entrants.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Participant(String);

impl Participant {
    /// Builds an entrant from raw text input. Returns `None` when the
    /// trimmed name is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        validate_participant_name(trimmed).ok()?;
        Some(Self(trimmed.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn validate_participant_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank_participant_name"));
    }
    Ok(())
}

/// Ordered entrant list. Ordering is significant: the position of a name
/// fixes its wheel segment, so the list is append-only.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Appends a trimmed name. Blank or whitespace-only input leaves the
    /// list unchanged.
    pub fn add(&mut self, raw: &str) -> bool {
        match Participant::parse(raw) {
            Some(participant) => {
                self.participants.push(participant);
                true
            }
            None => false,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Frozen copy used to resolve one spin independently of later edits.
    pub fn snapshot(&self) -> Vec<Participant> {
        self.participants.clone()
    }
}
