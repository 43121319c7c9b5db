//! Local master key management for columnar file encryption
//!
//! Wraps per-file data keys under named master keys, unwraps them on read,
//! and rotates the master key set in two steps (stage, then promote).
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


pub mod envelope;
pub mod error;
pub mod key_list;
pub mod key_types;
pub mod kms;
pub mod local_client;
pub mod registry;
pub mod rotation;
pub mod service_integration;

pub use error::{ErrorKind, KmsError, KmsResult};
pub use key_list::parse_key_list;
pub use key_types::{KeyId, KeyMap, MasterKey, RotationPhase, RotationStatus};
pub use kms::KmsClient;
pub use local_client::LocalKmsClient;
pub use registry::KeyRegistry;
pub use rotation::KeyRing;
pub use service_integration::*;
pub use vaultkms_config::{KmsConfig, KEY_LIST_PROPERTY_NAME, NEW_KEY_LIST_PROPERTY_NAME};
