//! Command implementations.

pub mod cancel;
pub mod cards;
pub mod process;
pub mod register;
pub mod status;

pub use self::cancel::execute_cancel;
pub use self::cards::execute_cards;
pub use self::process::execute_process;
pub use self::register::execute_register;
pub use self::status::execute_status;

use zubrilka_domain::{DocumentId, OwnerId, StatusId};

/// Parse a document id argument.
pub(crate) fn parse_document_id(input: &str) -> anyhow::Result<DocumentId> {
    DocumentId::from_string(input).map_err(anyhow::Error::msg)
}

/// Parse an owner id argument.
pub(crate) fn parse_owner_id(input: &str) -> anyhow::Result<OwnerId> {
    OwnerId::from_string(input).map_err(anyhow::Error::msg)
}

/// Parse a status id argument.
pub(crate) fn parse_status_id(input: &str) -> anyhow::Result<StatusId> {
    StatusId::from_string(input).map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_id_round_trip() {
        let id = parse_document_id("0191d5e0-1234-7abc-8def-0123456789ab").unwrap();
        assert_eq!(id.to_string(), "0191d5e0-1234-7abc-8def-0123456789ab");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_document_id("not-a-uuid").is_err());
        assert!(parse_owner_id("").is_err());
        assert!(parse_status_id("0191d5e0").is_err());
    }
}
