//! Opaque parameter state for host-style save and restore.
//!
//! The blob is versioned JSON keyed by each parameter's stable string ID, with
//! values in natural units. Only parameters are stored; delay history and LFO
//! phase are runtime state and always start fresh.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use sweep_core::{FlangerParam, FlangerParams, ParameterInfo};

use crate::error::ConfigError;

/// Version written by [`to_state_bytes`].
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StateBlob {
    version: u32,
    params: BTreeMap<String, f32>,
}

/// Serializes `params` into a state blob.
///
/// # Example
///
/// ```rust
/// use sweep_config::{from_state_bytes, to_state_bytes};
/// use sweep_core::FlangerParams;
///
/// let params = FlangerParams::default().with_feedback(0.42);
/// let bytes = to_state_bytes(&params).unwrap();
/// assert_eq!(from_state_bytes(&bytes).unwrap(), params);
/// ```
pub fn to_state_bytes(params: &FlangerParams) -> Result<Vec<u8>, ConfigError> {
    let blob = StateBlob {
        version: STATE_VERSION,
        params: FlangerParam::ALL
            .iter()
            .map(|p| {
                (
                    p.descriptor().string_id.to_string(),
                    params.get_param(p.index()),
                )
            })
            .collect(),
    };
    Ok(serde_json::to_vec(&blob)?)
}

/// Restores parameters from a state blob.
///
/// Missing entries keep their defaults and unknown entries are ignored, so
/// blobs survive parameters being added or retired. Values are clamped the
/// same way as any other parameter write.
pub fn from_state_bytes(bytes: &[u8]) -> Result<FlangerParams, ConfigError> {
    let blob: StateBlob = serde_json::from_slice(bytes)?;
    if blob.version != STATE_VERSION {
        return Err(ConfigError::StateVersion {
            found: blob.version,
            expected: STATE_VERSION,
        });
    }

    let mut params = FlangerParams::default();
    for param in FlangerParam::ALL {
        if let Some(&value) = blob.params.get(param.descriptor().string_id) {
            params.set_param(param.index(), value);
        }
    }
    Ok(params)
}
