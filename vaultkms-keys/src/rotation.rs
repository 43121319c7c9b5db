//! Two-phase master key rotation
//!
//! ```text
//! Stable --begin_rotation--> Rotating --finish_rotation--> Stable
//! ```
//!
//! While `Rotating`, wrapping uses the staged keys and unwrapping keeps
//! using the active keys, so data written before the rotation stays
//! readable until the staged set is promoted.
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


use crate::key_types::{KeyMap, RotationPhase, RotationStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Active and staged key sets
#[derive(Debug, Clone)]
pub enum KeyRing {
    Stable {
        keys: Arc<KeyMap>,
    },
    Rotating {
        active: Arc<KeyMap>,
        staged: Arc<KeyMap>,
        started_at: DateTime<Utc>,
    },
}

impl KeyRing {
    pub fn new(keys: KeyMap) -> Self {
        KeyRing::Stable {
            keys: Arc::new(keys),
        }
    }

    /// Keys used to unwrap
    pub fn active(&self) -> &Arc<KeyMap> {
        match self {
            KeyRing::Stable { keys } => keys,
            KeyRing::Rotating { active, .. } => active,
        }
    }

    /// Keys used to wrap
    pub fn staged(&self) -> &Arc<KeyMap> {
        match self {
            KeyRing::Stable { keys } => keys,
            KeyRing::Rotating { staged, .. } => staged,
        }
    }

    pub fn phase(&self) -> RotationPhase {
        match self {
            KeyRing::Stable { .. } => RotationPhase::Stable,
            KeyRing::Rotating { .. } => RotationPhase::Rotating,
        }
    }

    /// Stage a new key set. Restaging during a rotation replaces the
    /// staged set and keeps the original start time.
    pub fn begin_rotation(self, staged: KeyMap) -> Self {
        let staged = Arc::new(staged);
        match self {
            KeyRing::Stable { keys } => KeyRing::Rotating {
                active: keys,
                staged,
                started_at: Utc::now(),
            },
            KeyRing::Rotating {
                active, started_at, ..
            } => KeyRing::Rotating {
                active,
                staged,
                started_at,
            },
        }
    }

    /// Promote the staged set. No-op when stable.
    pub fn finish_rotation(self) -> Self {
        match self {
            KeyRing::Stable { keys } => KeyRing::Stable { keys },
            KeyRing::Rotating { staged, .. } => KeyRing::Stable { keys: staged },
        }
    }

    pub fn status(&self) -> RotationStatus {
        let active = self.active();
        let staged = self.staged();
        RotationStatus {
            phase: self.phase(),
            active_fingerprint: active.fingerprint(),
            active_keys: active.names(),
            staged_fingerprint: staged.fingerprint(),
            staged_keys: staged.names(),
            rotation_started_at: match self {
                KeyRing::Stable { .. } => None,
                KeyRing::Rotating { started_at, .. } => Some(*started_at),
            },
        }
    }
}
