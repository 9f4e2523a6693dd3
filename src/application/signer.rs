use std::fmt;

use hmac::{Hmac, Mac as _};
use secrecy::{ExposeSecret as _, SecretString};
use sha2::Sha256;

use crate::Result;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_PREFIX: &str = "sha256=";

/// HMAC-SHA256 tag over a payload, rendered as `sha256=<lowercase hex>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature([u8; 32]);

impl Signature {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Re-derives the tag for `payload` and compares in constant time.
    #[must_use]
    pub fn verify(&self, payload: &[u8], secret: &SecretString) -> bool {
        let Ok(mac) = mac_for(payload, secret) else {
            return false;
        };
        mac.verify_slice(&self.0).is_ok()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SIGNATURE_PREFIX}{}", hex::encode(self.0))
    }
}

/// Signs `payload` with `secret` as the HMAC key.
pub fn sign(payload: &[u8], secret: &SecretString) -> Result<Signature> {
    let tag = mac_for(payload, secret)?.finalize().into_bytes();
    let mut bytes = [0_u8; 32];
    bytes.copy_from_slice(&tag);
    Ok(Signature(bytes))
}

fn mac_for(payload: &[u8], secret: &SecretString) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())?;
    mac.update(payload);
    Ok(mac)
}
