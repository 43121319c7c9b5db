//! Parsing of configured `name:base64-secret` master key lists
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
use crate::key_types::{KeyMap, MasterKey};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::{debug, warn};

/// Separator between key name and secret
pub const KEY_ENTRY_SEPARATOR: char = ':';

/// Standard alphabet. Encodes with padding, decodes with or without it.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parse a master key list.
///
/// Fails on the first bad entry; nothing parsed before it is returned.
/// Later entries replace earlier entries with the same name.
pub fn parse_key_list<S: AsRef<str>>(entries: &[S]) -> KmsResult<KeyMap> {
    let mut keys = KeyMap::new();

    for entry in entries {
        let key = parse_key_entry(entry.as_ref())?;
        if let Some(previous) = keys.insert(key) {
            debug!(key = previous.name(), "Duplicate master key name, later entry wins");
        }
    }

    Ok(keys)
}

/// Parse a single `name:base64-secret` entry
pub fn parse_key_entry(entry: &str) -> KmsResult<MasterKey> {
    let parts: Vec<&str> = entry.split(KEY_ENTRY_SEPARATOR).collect();
    let name = parts[0].trim();

    // "k1:" has no secret part at all
    if parts.len() != 2 || name.is_empty() || parts[1].trim().is_empty() {
        warn!(key = name, "Master key entry is not formatted correctly");
        return Err(KmsError::MalformedKeyEntry(name.to_string()));
    }

    let secret = BASE64.decode(parts[1].trim()).map_err(|e| {
        warn!(key = name, error = %e, "Could not decode master key");
        KmsError::InvalidKeyEncoding(name.to_string())
    })?;

    let key = MasterKey::new(name, secret);
    if !key.has_supported_length() {
        warn!(
            key = name,
            length = key.secret().len(),
            "Master key length is not 16, 24 or 32 bytes; wrapping with it will fail"
        );
    }
    Ok(key)
}
