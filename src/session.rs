// src/session.rs
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use astra::Request;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, error, info};

use crate::errors::ServerError;
use crate::state::SelectionState;

pub const SESSION_COOKIE: &str = "map_session";
pub const SESSION_TOKEN_BYTES: usize = 32;
/// Sessions untouched for this long are dropped on the next sweep.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);
/// Hard cap; the least recently used sessions go first.
pub const MAX_SESSIONS: usize = 10_000;

struct Entry {
    state: SelectionState,
    last_seen: Instant,
}

/// In-memory browser sessions, one `SelectionState` each. Lost on restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the caller's token if it names a live session, otherwise a
    /// freshly created one. The flag is true when a new session was made.
    /// Creating a session first sweeps out idle ones.
    pub fn resolve(&self, presented: Option<&str>, now: Instant) -> Result<(String, bool), ServerError> {
        let mut sessions = self.lock()?;

        if let Some(token) = presented {
            if let Some(entry) = sessions.get_mut(token) {
                if now.saturating_duration_since(entry.last_seen) < SESSION_IDLE_TIMEOUT {
                    entry.last_seen = now;
                    return Ok((token.to_string(), false));
                }
            }
        }

        sweep(&mut sessions, now);

        let token = generate_token(&mut OsRng, SESSION_TOKEN_BYTES);
        sessions.insert(
            token.clone(),
            Entry {
                state: SelectionState::default(),
                last_seen: now,
            },
        );
        debug!(sessions = sessions.len(), "created session");
        Ok((token, true))
    }

    /// Run `f` against one session's state. Keep `f` short: it holds the
    /// store lock.
    pub fn with_session<F, T>(&self, token: &str, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut SelectionState) -> T,
    {
        let mut sessions = self.lock()?;
        let entry = sessions.get_mut(token).ok_or(ServerError::NotFound)?;
        Ok(f(&mut entry.state))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, ServerError> {
        self.sessions.lock().map_err(|_| {
            error!("session store mutex poisoned");
            ServerError::InternalError
        })
    }
}

/// Drop idle sessions, then the oldest ones until there is room for one more.
fn sweep(sessions: &mut HashMap<String, Entry>, now: Instant) {
    let before = sessions.len();
    sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < SESSION_IDLE_TIMEOUT);

    if sessions.len() >= MAX_SESSIONS {
        let mut by_age: Vec<(Instant, String)> = sessions
            .iter()
            .map(|(token, entry)| (entry.last_seen, token.clone()))
            .collect();
        by_age.sort();
        let excess = sessions.len() + 1 - MAX_SESSIONS;
        for (_, token) in by_age.into_iter().take(excess) {
            sessions.remove(&token);
        }
    }

    let evicted = before - sessions.len();
    if evicted > 0 {
        info!(evicted, remaining = sessions.len(), "evicted sessions");
    }
}

/// URL-safe, unpadded base64 of `nbytes` random bytes.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Session token from the request's `Cookie` header, if any.
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}
