use crate::domain::Card;
use crate::error::{CatswpError, Result};

/// Only web locators are handed to the system opener
pub fn is_openable(reference: &str) -> bool {
    reference.starts_with("https://") || reference.starts_with("http://")
}

/// Opens the card's picture with the system's default handler (usually the
/// browser). Returns immediately; the launched program is detached.
pub fn open_card(card: &Card) -> Result<()> {
    if !is_openable(&card.reference) {
        return Err(CatswpError::InvalidOperation(
            "card reference is not a web address",
        ));
    }

    tracing::info!(card = card.id, url = %card.reference, "opening card");
    open::that_detached(&card.reference)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_openable() {
        assert!(is_openable("https://cataas.com/cat/abc"));
        assert!(is_openable("http://localhost:8080/cat/abc"));
        assert!(!is_openable("mem://cat/abc"));
        assert!(!is_openable("/etc/passwd"));
    }

    #[test]
    fn test_open_card_rejects_non_web_reference() {
        let card = Card::new(1, "file:///tmp/cat.png");
        let result = open_card(&card);
        assert!(matches!(result, Err(CatswpError::InvalidOperation(_))));
    }
}
