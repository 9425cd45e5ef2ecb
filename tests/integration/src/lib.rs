//! Integration tests for Tessera.
//!
//! These tests drive the generators the way a server would: mint a
//! credential, hand the plaintext to a client, keep only the derivative, and
//! later check what the client presents.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use std::collections::HashMap;

use anyhow::{bail, Result};
use tessera_crypto::{aes_decrypt, aes_encrypt, sha256_hash, sha256_verify};
use tessera_tokens::{
    backup_codes, generate_token, password, verify_api_key, verify_password, HashedToken,
    PasswordCredential, SignedToken, TokenKind,
};

// ============================================================================
// Server-side Store
// ============================================================================

/// What a server persists per user: derivatives only, never plaintexts.
#[derive(Default)]
pub struct CredentialStore {
    token_hashes: HashMap<String, String>,
    api_key_signatures: HashMap<String, String>,
    password_hashes: HashMap<String, String>,
    backup_code_hashes: HashMap<String, Vec<String>>,
    sealed: HashMap<String, String>,
}

impl CredentialStore {
    /// Records a token digest under `user`.
    pub fn store_token(&mut self, user: &str, token: &HashedToken) {
        self.token_hashes
            .insert(user.to_string(), token.hash().to_string());
    }

    /// Checks a presented token by digest lookup.
    pub fn check_token(&self, user: &str, presented: &str) -> bool {
        self.token_hashes
            .get(user)
            .is_some_and(|hash| sha256_verify(presented, hash))
    }

    /// Records an API key signature under `user`.
    pub fn store_api_key(&mut self, user: &str, key: &SignedToken) {
        self.api_key_signatures
            .insert(user.to_string(), key.signature().to_string());
    }

    /// Checks a presented API key against the stored signature.
    pub fn check_api_key(&self, user: &str, presented: &str, secret: &str) -> bool {
        self.api_key_signatures
            .get(user)
            .is_some_and(|sig| verify_api_key(presented, secret, sig))
    }

    /// Records a password hash under `user`.
    pub fn store_password(&mut self, user: &str, credential: &PasswordCredential) {
        self.password_hashes
            .insert(user.to_string(), credential.hash().to_string());
    }

    /// Checks a login attempt.
    pub fn login(&self, user: &str, presented: &str) -> bool {
        self.password_hashes
            .get(user)
            .is_some_and(|hash| verify_password(presented, hash))
    }

    /// Records backup code digests under `user`.
    pub fn store_backup_codes(&mut self, user: &str, codes: &[HashedToken]) {
        self.backup_code_hashes.insert(
            user.to_string(),
            codes.iter().map(|c| c.hash().to_string()).collect(),
        );
    }

    /// Redeems a backup code once.
    pub fn redeem_backup_code(&mut self, user: &str, presented: &str) -> Result<()> {
        let Some(hashes) = self.backup_code_hashes.get_mut(user) else {
            bail!("no backup codes for {user}");
        };
        let digest = sha256_hash(presented);
        let Some(pos) = hashes.iter().position(|h| *h == digest) else {
            bail!("invalid backup code");
        };
        hashes.swap_remove(pos);
        Ok(())
    }

    /// Seals a value for `tenant` under the master secret.
    pub fn seal(&mut self, tenant: &str, value: &str, secret: &str) -> Result<()> {
        let blob = aes_encrypt(value, secret, Some(tenant))?;
        self.sealed.insert(tenant.to_string(), blob);
        Ok(())
    }

    /// Returns the raw envelope stored for `tenant`.
    pub fn envelope(&self, tenant: &str) -> Option<&str> {
        self.sealed.get(tenant).map(String::as_str)
    }

    /// Opens the value sealed for `tenant`.
    pub fn unseal(&self, tenant: &str, secret: &str) -> Result<String> {
        let Some(blob) = self.envelope(tenant) else {
            bail!("nothing sealed for {tenant}");
        };
        Ok(aes_decrypt(blob, secret, Some(tenant))?)
    }
}

/// Mints a session token and stores its digest.
pub fn sign_in(store: &mut CredentialStore, user: &str) -> Result<HashedToken> {
    let token = generate_token(TokenKind::Session)?;
    store.store_token(user, &token);
    Ok(token)
}

/// Provisions a generated password and backup codes for `user`.
pub fn provision(
    store: &mut CredentialStore,
    user: &str,
) -> Result<(PasswordCredential, Vec<HashedToken>)> {
    let credential = password()?;
    let codes = backup_codes(5)?;
    store.store_password(user, &credential);
    store.store_backup_codes(user, &codes);
    Ok((credential, codes))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use tessera_tokens::{
        api_key, decode_jwt, encode_jwt, reveal_webhook_secret, webhook_secret, TokenError,
    };

    const MASTER: &str = "integration-master-secret";

    #[test]
    fn test_session_token_flow() {
        let mut store = CredentialStore::default();
        let token = sign_in(&mut store, "alice").unwrap();

        assert!(store.check_token("alice", token.plaintext()));
        assert!(!store.check_token("alice", "sess_forged"));
        assert!(!store.check_token("bob", token.plaintext()));
    }

    #[test]
    fn test_api_key_flow() {
        let mut store = CredentialStore::default();
        let key = api_key(MASTER).unwrap();
        store.store_api_key("svc", &key);

        assert!(store.check_api_key("svc", key.plaintext(), MASTER));
        assert!(!store.check_api_key("svc", key.plaintext(), "rotated-secret"));
    }

    #[test]
    fn test_webhook_secret_roundtrip() {
        let secret = webhook_secret(MASTER).unwrap();
        let revealed = reveal_webhook_secret(secret.encrypted(), MASTER).unwrap();

        assert_eq!(revealed, secret.plaintext());
        assert!(matches!(
            reveal_webhook_secret(secret.encrypted(), "wrong"),
            Err(TokenError::Crypto(_))
        ));
    }

    #[test]
    fn test_password_and_backup_codes() {
        let mut store = CredentialStore::default();
        let (credential, codes) = provision(&mut store, "carol").unwrap();

        assert!(store.login("carol", credential.plaintext()));
        assert!(!store.login("carol", "guess"));

        store
            .redeem_backup_code("carol", codes[0].plaintext())
            .unwrap();
        assert!(store
            .redeem_backup_code("carol", codes[0].plaintext())
            .is_err());
        assert!(store
            .redeem_backup_code("carol", codes[1].plaintext())
            .is_ok());
    }

    #[test]
    fn test_tenant_envelopes_do_not_cross() {
        let mut store = CredentialStore::default();
        store.seal("tenant-a", "a-data", MASTER).unwrap();
        store.seal("tenant-b", "b-data", MASTER).unwrap();

        assert_eq!(store.unseal("tenant-a", MASTER).unwrap(), "a-data");
        assert_eq!(store.unseal("tenant-b", MASTER).unwrap(), "b-data");

        // Moving tenant A's envelope under tenant B's context fails.
        let a_blob = store.envelope("tenant-a").unwrap();
        assert!(aes_decrypt(a_blob, MASTER, Some("tenant-b")).is_err());
    }

    #[test]
    fn test_jwt_session() {
        let mut claims = Map::new();
        claims.insert("sub".into(), json!("alice"));
        claims.insert("scope".into(), json!(["read", "write"]));

        let token = encode_jwt(&claims, MASTER, 300).unwrap();
        let decoded = decode_jwt(&token, MASTER).unwrap();

        assert_eq!(decoded["sub"], "alice");
        assert_eq!(decoded["scope"], json!(["read", "write"]));
        assert!(decode_jwt(&token, "other").is_err());
    }

    #[test]
    fn test_every_token_kind_is_distinct() {
        let tokens: Vec<_> = TokenKind::ALL
            .into_iter()
            .map(|kind| generate_token(kind).unwrap())
            .collect();

        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert_ne!(a.plaintext(), b.plaintext());
                assert_ne!(a.hash(), b.hash());
            }
        }
    }
}
