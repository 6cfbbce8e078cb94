//! Per-browser device identifier used to fingerprint signup/login attempts.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::storage::{KeyValueStore, DEVICE_ID_KEY};

const FALLBACK_SUFFIX_LEN: usize = 10;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Return the stored device id, creating and persisting one on first use.
///
/// Storage failures never escape: the caller gets a fresh, unpersisted id
/// for this call only.
pub fn get_or_create_device_id(store: &dyn KeyValueStore) -> String {
    match store.get(DEVICE_ID_KEY) {
        Ok(Some(existing)) if !existing.trim().is_empty() => existing.trim().to_string(),
        Ok(_) => {
            let created = generate_device_id();
            if let Err(e) = store.set(DEVICE_ID_KEY, &created) {
                debug!("Could not persist device id: {}", e);
            }
            created
        }
        Err(e) => {
            debug!("Device id storage unavailable: {}", e);
            generate_device_id()
        }
    }
}

/// Random v4 UUID, or `dev-<millis>-<suffix>` when OS randomness is missing.
pub fn generate_device_id() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string(),
        Err(e) => {
            debug!("OS randomness unavailable, using fallback device id: {}", e);
            fallback_device_id()
        }
    }
}

fn fallback_device_id() -> String {
    let now = chrono::Utc::now();
    let seed = now.timestamp_nanos_opt().unwrap_or_default() as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    let suffix: String = (0..FALLBACK_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("dev-{}-{}", now.timestamp_millis(), suffix)
}
