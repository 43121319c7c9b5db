//! Process-wide master key registry
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
use crate::key_list::parse_key_list;
use crate::key_types::{KeyMap, RotationStatus};
use crate::rotation::KeyRing;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// Master key registry shared by every client of one process.
///
/// All access goes through a single lock. Key lists are parsed before the
/// lock is taken, so a bad list never changes the registry.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    ring: Mutex<Option<KeyRing>>,
}

impl KeyRegistry {
    /// Create an empty registry. Wrap and unwrap fail until it is initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry already initialized with `key_list`
    pub fn from_key_list<S: AsRef<str>>(key_list: &[S]) -> KmsResult<Self> {
        let registry = Self::new();
        registry.initialize(key_list)?;
        Ok(registry)
    }

    /// Replace both key sets with `key_list`
    pub fn initialize<S: AsRef<str>>(&self, key_list: &[S]) -> KmsResult<()> {
        let keys = parse_non_empty(key_list)?;
        let fingerprint = keys.fingerprint();
        let count = keys.len();

        *self.ring.lock() = Some(KeyRing::new(keys));

        info!(
            keys = count,
            fingerprint = %fingerprint,
            "Master key registry initialized"
        );
        Ok(())
    }

    /// Stage `new_key_list` for wrapping. Unwrapping keeps the active set.
    pub fn begin_rotation<S: AsRef<str>>(&self, new_key_list: &[S]) -> KmsResult<()> {
        let staged = parse_non_empty(new_key_list)?;
        let fingerprint = staged.fingerprint();
        let count = staged.len();

        let mut ring = self.ring.lock();
        let current = ring.take().ok_or(KmsError::NoKeysConfigured)?;
        *ring = Some(current.begin_rotation(staged));
        drop(ring);

        info!(
            keys = count,
            fingerprint = %fingerprint,
            "Master key rotation started"
        );
        Ok(())
    }

    /// Promote the staged key set to active
    pub fn finish_rotation(&self) {
        let mut ring = self.ring.lock();
        match ring.take() {
            Some(current) => {
                let promoted = current.finish_rotation();
                let fingerprint = promoted.active().fingerprint();
                *ring = Some(promoted);
                drop(ring);
                info!(fingerprint = %fingerprint, "Master key rotation finished");
            }
            None => debug!("Rotation finish requested on an empty registry"),
        }
    }

    /// Key set used for unwrapping
    pub fn active_keys(&self) -> KmsResult<Arc<KeyMap>> {
        self.ring
            .lock()
            .as_ref()
            .map(|ring| Arc::clone(ring.active()))
            .ok_or(KmsError::NoKeysConfigured)
    }

    /// Key set used for wrapping
    pub fn staged_keys(&self) -> KmsResult<Arc<KeyMap>> {
        self.ring
            .lock()
            .as_ref()
            .map(|ring| Arc::clone(ring.staged()))
            .ok_or(KmsError::NoKeysConfigured)
    }

    pub fn is_initialized(&self) -> bool {
        self.ring.lock().is_some()
    }

    pub fn status(&self) -> KmsResult<RotationStatus> {
        self.ring
            .lock()
            .as_ref()
            .map(KeyRing::status)
            .ok_or(KmsError::NoKeysConfigured)
    }
}

fn parse_non_empty<S: AsRef<str>>(key_list: &[S]) -> KmsResult<KeyMap> {
    if key_list.is_empty() {
        return Err(KmsError::NoKeysConfigured);
    }
    parse_key_list(key_list)
}
