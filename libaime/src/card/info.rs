use crate::card::CardSession;
use crate::types::CardFamily;

/// Compact, printable description of the current card (family and
/// identifier), for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "{} {}", family, id)]
pub struct CardSummary {
    pub family: CardFamily,
    /// UID or IDm as uppercase hex
    pub id: String,
}

impl From<&CardSession> for CardSummary {
    fn from(session: &CardSession) -> Self {
        Self {
            family: session.family(),
            id: crate::utils::bytes_to_hex(session.uid_or_idm()),
        }
    }
}
