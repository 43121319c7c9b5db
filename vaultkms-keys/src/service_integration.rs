//! Helpers for hosts wiring the local KMS client from configuration
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
use crate::kms::KmsClient;
use crate::local_client::LocalKmsClient;
use anyhow::Context;
use tracing::{info, warn};
use vaultkms_config::{KmsConfig, KEY_LIST_PROPERTY_NAME, NEW_KEY_LIST_PROPERTY_NAME};

/// Initialize a local KMS client from configuration
pub fn init_kms_client(config: &KmsConfig) -> anyhow::Result<LocalKmsClient> {
    info!(
        keys = config.key_list.len(),
        rotation_configured = config.has_new_key_list(),
        "Initializing local KMS client"
    );

    let client = LocalKmsClient::standalone();
    client
        .initialize(&config.key_list)
        .with_context(|| format!("Failed to load master keys from {}", KEY_LIST_PROPERTY_NAME))?;

    Ok(client)
}

/// Component name attached to bootstrap log output
pub const LOG_COMPONENT: &str = "vaultkms";

/// Install logging at the configured level, then initialize the client.
///
/// A subscriber the host already installed is kept.
pub fn bootstrap_kms_client(config: &KmsConfig) -> anyhow::Result<LocalKmsClient> {
    vaultkms_logging::init_logging(LOG_COMPONENT, config.log_level());
    init_kms_client(config)
}

/// Initialize logging and a local KMS client from environment configuration
pub fn init_kms_client_from_env() -> anyhow::Result<LocalKmsClient> {
    let config = KmsConfig::from_env().context("Failed to load KMS configuration")?;
    bootstrap_kms_client(&config)
}

/// Stage the configured new key list on `client`
pub fn begin_rotation_from_config(client: &LocalKmsClient, config: &KmsConfig) -> KmsResult<()> {
    if !config.has_new_key_list() {
        warn!(
            property = NEW_KEY_LIST_PROPERTY_NAME,
            "Key rotation requested without a new key list"
        );
        return Err(KmsError::NoKeysConfigured);
    }
    client.begin_rotation(&config.new_key_list)
}
