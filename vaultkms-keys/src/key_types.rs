//! Key type definitions
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


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use zeroize::Zeroizing;

/// Master key identifier, as written into file metadata
pub type KeyId = String;

/// Secret lengths accepted for master keys (AES-128, AES-192, AES-256)
pub const SUPPORTED_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// A named master key. Immutable once parsed.
#[derive(Clone)]
pub struct MasterKey {
    name: KeyId,
    secret: Zeroizing<Vec<u8>>,
}

impl MasterKey {
    /// Create a master key. Any length is accepted here; wrapping under a
    /// key whose length is not in [`SUPPORTED_KEY_LENGTHS`] fails.
    pub fn new(name: impl Into<KeyId>, secret: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            secret: Zeroizing::new(secret),
        }
    }

    /// True when AES-GCM can use this secret
    pub fn has_supported_length(&self) -> bool {
        SUPPORTED_KEY_LENGTHS.contains(&self.secret.len())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey")
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Master keys by name
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    keys: HashMap<KeyId, MasterKey>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, replacing any earlier key with the same name
    pub fn insert(&mut self, key: MasterKey) -> Option<MasterKey> {
        self.keys.insert(key.name.clone(), key)
    }

    pub fn get(&self, name: &str) -> Option<&MasterKey> {
        self.keys.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key names in sorted order
    pub fn names(&self) -> Vec<KeyId> {
        let mut names: Vec<KeyId> = self.keys.keys().cloned().collect();
        names.sort();
        names
    }

    /// Short digest identifying this key set in logs.
    ///
    /// Two maps with the same names bound to the same secrets always
    /// produce the same fingerprint; the secrets cannot be recovered from it.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for name in self.names() {
            let key = &self.keys[&name];
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(key.secret());
            hasher.update([0u8]);
        }
        let digest = hasher.finalize();
        hex::encode(&digest[..8])
    }
}

/// Rotation phase of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPhase {
    /// Wrap and unwrap use the same key set
    Stable,
    /// Wrap uses the staged set, unwrap still uses the active set
    Rotating,
}

/// Snapshot of the registry for operators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationStatus {
    pub phase: RotationPhase,
    pub active_fingerprint: String,
    pub active_keys: Vec<KeyId>,
    pub staged_fingerprint: String,
    pub staged_keys: Vec<KeyId>,
    pub rotation_started_at: Option<DateTime<Utc>>,
}

impl RotationStatus {
    pub fn is_rotating(&self) -> bool {
        self.phase == RotationPhase::Rotating
    }
}
