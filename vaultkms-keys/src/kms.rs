//! KMS client interface consumed by the columnar encryption framework
//!
//! The framework hands each session a client, wraps every data key it
//! writes and unwraps every data key it reads. Backends:
//! - Local in-memory master keys (this crate)
//! - Remote KMS services (not provided)
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


use crate::error::KmsResult;

/// Trait for KMS client backends
pub trait KmsClient: Send + Sync {
    /// Load the master key list for a session
    fn initialize(&self, key_list: &[String]) -> KmsResult<()>;

    /// Wrap a data key with the named master key
    fn wrap_key(&self, key_bytes: &[u8], master_key_identifier: &str) -> KmsResult<String>;

    /// Recover a data key wrapped with the named master key
    fn unwrap_key(&self, wrapped_key: &str, master_key_identifier: &str) -> KmsResult<Vec<u8>>;
}
