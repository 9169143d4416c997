//! Per-user session registry.
//!
//! Each user gets one slot guarded by an async mutex. Handlers hold the slot
//! for a whole load/draw/answer/save step, so two requests from the same user
//! cannot interleave their weight updates. Different users never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::Session;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex as AsyncMutex;

/// Everything kept in memory for one user.
pub struct UserSlot {
    pub session: Option<Session>,
    pub rng: StdRng,
}

pub type SharedSlot = Arc<AsyncMutex<UserSlot>>;

pub struct SessionRegistry {
    slots: Mutex<HashMap<String, SharedSlot>>,
    seed: Option<u64>,
}

impl SessionRegistry {
    /// With a seed, every new slot starts from the same RNG state.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            seed,
        }
    }

    /// The user's slot, created empty if missing.
    pub fn slot(&self, user_id: &str) -> SharedSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(user_id.to_string())
            .or_insert_with(|| {
                let rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                Arc::new(AsyncMutex::new(UserSlot { session: None, rng }))
            })
            .clone()
    }

    /// The user's slot if one was ever created.
    pub fn existing(&self, user_id: &str) -> Option<SharedSlot> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(user_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
