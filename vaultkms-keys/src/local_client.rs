//! In-memory KMS client backed by a shared key registry
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


use crate::envelope::{unwrap_key_locally, wrap_key_locally};
use crate::error::{KmsError, KmsResult};
use crate::key_types::RotationStatus;
use crate::kms::KmsClient;
use crate::registry::KeyRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

/// Local KMS client.
///
/// Clients created from the same registry observe the same keys and
/// the same rotation state.
#[derive(Debug, Clone)]
pub struct LocalKmsClient {
    registry: Arc<KeyRegistry>,
}

impl LocalKmsClient {
    /// Create a client over an existing registry
    pub fn new(registry: Arc<KeyRegistry>) -> Self {
        Self { registry }
    }

    /// Create a client with its own, not yet initialized, registry
    pub fn standalone() -> Self {
        Self::new(Arc::new(KeyRegistry::new()))
    }

    pub fn registry(&self) -> &Arc<KeyRegistry> {
        &self.registry
    }

    /// Stage a new master key list. New data keys are wrapped with it,
    /// existing ones still unwrap with the active list.
    pub fn begin_rotation<S: AsRef<str>>(&self, new_key_list: &[S]) -> KmsResult<()> {
        self.registry.begin_rotation(new_key_list)
    }

    /// Make the staged master key list the active one
    pub fn finish_rotation(&self) {
        self.registry.finish_rotation()
    }

    pub fn rotation_status(&self) -> KmsResult<RotationStatus> {
        self.registry.status()
    }
}

impl KmsClient for LocalKmsClient {
    fn initialize(&self, key_list: &[String]) -> KmsResult<()> {
        self.registry.initialize(key_list)
    }

    fn wrap_key(&self, key_bytes: &[u8], master_key_identifier: &str) -> KmsResult<String> {
        // Always wrap with the newest key set
        let keys = self.registry.staged_keys()?;
        let master_key = keys
            .get(master_key_identifier)
            .ok_or_else(|| KmsError::KeyNotFound(master_key_identifier.to_string()))?;

        let aad = master_key_identifier.as_bytes();
        let wrapped = wrap_key_locally(key_bytes, master_key, aad).map_err(|e| {
            if e.is_configuration_error() {
                warn!(master_key = master_key_identifier, error = %e, "Master key cannot be used for wrapping");
            }
            e
        })?;

        debug!(master_key = master_key_identifier, "Data key wrapped");
        Ok(wrapped)
    }

    fn unwrap_key(&self, wrapped_key: &str, master_key_identifier: &str) -> KmsResult<Vec<u8>> {
        let keys = self.registry.active_keys()?;
        let master_key = keys
            .get(master_key_identifier)
            .ok_or_else(|| KmsError::KeyNotFound(master_key_identifier.to_string()))?;

        let aad = master_key_identifier.as_bytes();
        match unwrap_key_locally(wrapped_key, master_key, aad) {
            Ok(key_bytes) => {
                debug!(master_key = master_key_identifier, "Data key unwrapped");
                Ok(key_bytes)
            }
            Err(e) => {
                warn!(master_key = master_key_identifier, "Data key unwrap rejected");
                Err(e)
            }
        }
    }
}
