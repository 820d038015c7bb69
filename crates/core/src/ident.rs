//! External identity tokens.
//!
//! Every record carries an opaque globally-unique string (`public_id`)
//! assigned once at creation and used for external references instead of
//! the numeric key. The generator sits behind a trait so tests can mint
//! predictable tokens.

pub trait TokenSource: Send + Sync {
    /// Mint a new globally-unique opaque token.
    fn mint(&self) -> String;
}

/// Production token source: UUIDv4 without hyphens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn mint(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
pub use test_support::SeqTokens;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_tokens_are_opaque_and_unique() {
        let src = UuidTokens;
        let a = src.mint();
        let b = src.mint();
        assert_eq!(a.len(), 32);
        assert!(!a.contains('-'));
        assert_ne!(a, b);
    }
}
