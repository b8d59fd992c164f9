//! Participant model

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Event;
use crate::utils::errors::EventDeskError;

/// Participant category, persisted as a small integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "KindRepr")]
pub enum ParticipantKind {
    Vip,
    Internal,
    External,
}

impl ParticipantKind {
    pub fn code(self) -> i16 {
        match self {
            ParticipantKind::Vip => 0,
            ParticipantKind::Internal => 1,
            ParticipantKind::External => 2,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(ParticipantKind::Vip),
            1 => Some(ParticipantKind::Internal),
            2 => Some(ParticipantKind::External),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantKind::Vip => "VIP",
            ParticipantKind::Internal => "INTERNAL",
            ParticipantKind::External => "EXTERNAL",
        }
    }
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i16> for ParticipantKind {
    type Error = EventDeskError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::from_code(code)
            .ok_or_else(|| EventDeskError::validation(format!("Unknown participant kind: {}", code)))
    }
}

// Clients send either the numeric code or the name
#[derive(Deserialize)]
#[serde(untagged)]
enum KindRepr {
    Code(i16),
    Name(String),
}

impl TryFrom<KindRepr> for ParticipantKind {
    type Error = String;

    fn try_from(repr: KindRepr) -> Result<Self, Self::Error> {
        match repr {
            KindRepr::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("unknown participant kind code {}", code))
            }
            KindRepr::Name(name) => match name.to_ascii_uppercase().as_str() {
                "VIP" => Ok(ParticipantKind::Vip),
                "INTERNAL" => Ok(ParticipantKind::Internal),
                "EXTERNAL" => Ok(ParticipantKind::External),
                _ => Err(format!("unknown participant kind '{}'", name)),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub full_name: String,
    pub cpf: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "i16")]
    pub kind: ParticipantKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRequest {
    pub full_name: String,
    pub cpf: String,
    pub phone: Option<String>,
    pub kind: ParticipantKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrolledEvent {
    pub event: Event,
    pub enrolled_at: DateTime<Utc>,
}

/// A participant with every event they are enrolled in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantWithEvents {
    pub participant: Participant,
    pub events: Vec<EnrolledEvent>,
}
