//! Local AES-GCM wrapping of data keys under a master key
//!
//! Wrapped form: base64(nonce || ciphertext || tag), 12-byte nonce and
//! 16-byte tag. The cipher width follows the master key length.
// Copyright 2025 Francisco F. Pinochet
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use crate::error::{KmsError, KmsResult};
use crate::key_list::BASE64;
use crate::key_types::MasterKey;
use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit, OsRng, Payload},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm,
};
use base64::Engine as _;

type Aes192Gcm = AesGcm<Aes192, U12>;

pub const NONCE_LENGTH: usize = 12;
pub const TAG_LENGTH: usize = 16;

/// Wrap `key_bytes` under `master_key`, binding `aad`
pub fn wrap_key_locally(key_bytes: &[u8], master_key: &MasterKey, aad: &[u8]) -> KmsResult<String> {
    let secret = master_key.secret();
    let sealed = match secret.len() {
        16 => seal::<Aes128Gcm>(secret, key_bytes, aad),
        24 => seal::<Aes192Gcm>(secret, key_bytes, aad),
        32 => seal::<Aes256Gcm>(secret, key_bytes, aad),
        length => Err(KmsError::InvalidKeyLength {
            name: master_key.name().to_string(),
            length,
        }),
    }?;
    Ok(BASE64.encode(sealed))
}

/// Unwrap a blob produced by [`wrap_key_locally`].
///
/// Every failure, including undecodable input, is `KeyAccessDenied`.
pub fn unwrap_key_locally(wrapped_key: &str, master_key: &MasterKey, aad: &[u8]) -> KmsResult<Vec<u8>> {
    let denied = || KmsError::KeyAccessDenied(master_key.name().to_string());

    let sealed = BASE64.decode(wrapped_key.trim()).map_err(|_| denied())?;
    if sealed.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(denied());
    }

    let secret = master_key.secret();
    let opened = match secret.len() {
        16 => open::<Aes128Gcm>(secret, &sealed, aad),
        24 => open::<Aes192Gcm>(secret, &sealed, aad),
        32 => open::<Aes256Gcm>(secret, &sealed, aad),
        _ => None,
    };
    opened.ok_or_else(denied)
}

fn seal<C: Aead + KeyInit>(secret: &[u8], plaintext: &[u8], aad: &[u8]) -> KmsResult<Vec<u8>> {
    let cipher = C::new_from_slice(secret)
        .map_err(|e| KmsError::Encryption(format!("Invalid master key: {}", e)))?;
    let nonce = C::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, Payload { msg: plaintext, aad })
        .map_err(|e| KmsError::Encryption(format!("Encryption failed: {}", e)))?;

    // Prepend nonce to ciphertext
    let mut result = nonce.to_vec();
    result.extend_from_slice(&ciphertext);
    Ok(result)
}

fn open<C: Aead + KeyInit>(secret: &[u8], sealed: &[u8], aad: &[u8]) -> Option<Vec<u8>> {
    let cipher = C::new_from_slice(secret).ok()?;
    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LENGTH);
    let nonce = aes_gcm::aead::Nonce::<C>::from_slice(nonce_bytes);

    cipher.decrypt(nonce, Payload { msg: ciphertext, aad }).ok()
}
