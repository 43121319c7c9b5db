//! Error types for key management
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


use thiserror::Error;

/// KMS errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmsError {
    #[error("No encryption key list")]
    NoKeysConfigured,

    #[error("Key '{0}' is not formatted correctly")]
    MalformedKeyEntry(String),

    #[error("Could not decode key '{0}'")]
    InvalidKeyEncoding(String),

    #[error("Key '{name}' has unsupported length {length} (expected 16, 24 or 32 bytes)")]
    InvalidKeyLength { name: String, length: usize },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Raised for every unwrap failure, whatever the cause.
    #[error("Access denied for master key: {0}")]
    KeyAccessDenied(String),

    #[error("Encryption error: {0}")]
    Encryption(String),
}

/// Payload-free discriminant of [`KmsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoKeysConfigured,
    MalformedKeyEntry,
    InvalidKeyEncoding,
    InvalidKeyLength,
    KeyNotFound,
    KeyAccessDenied,
    Encryption,
}

impl KmsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KmsError::NoKeysConfigured => ErrorKind::NoKeysConfigured,
            KmsError::MalformedKeyEntry(_) => ErrorKind::MalformedKeyEntry,
            KmsError::InvalidKeyEncoding(_) => ErrorKind::InvalidKeyEncoding,
            KmsError::InvalidKeyLength { .. } => ErrorKind::InvalidKeyLength,
            KmsError::KeyNotFound(_) => ErrorKind::KeyNotFound,
            KmsError::KeyAccessDenied(_) => ErrorKind::KeyAccessDenied,
            KmsError::Encryption(_) => ErrorKind::Encryption,
        }
    }

    /// True for errors caused by the configured key list itself.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NoKeysConfigured
                | ErrorKind::MalformedKeyEntry
                | ErrorKind::InvalidKeyEncoding
                | ErrorKind::InvalidKeyLength
        )
    }
}

/// Result type for KMS operations
pub type KmsResult<T> = Result<T, KmsError>;
