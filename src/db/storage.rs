// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed repository over a key-value store.
//!
//! Provides high-level operations for:
//! - User (the single profile aggregate)
//! - Auth token (opaque session string)
//! - Programs and injuries (catalog data)
//! - Reminders (full list, rewritten on every change)

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::db::{keys, KeyValueStore, MemoryStore};
use crate::error::{AppError, Outcome, Result, SkipReason};
use crate::models::{Injury, RecoveryProgram, Reminder, User};

/// Repository for all persisted application state.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles on the user blob.
    user_lock: Arc<Mutex<()>>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            user_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Repository backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(blob) => serde_json::from_str(&blob)
                .map(Some)
                .map_err(|e| AppError::Storage(format!("Failed to decode {}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let blob = serde_json::to_string(value)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", key, e)))?;
        self.store.set(key, blob)
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn get_user(&self) -> Result<Option<User>> {
        self.get_json(keys::USER)
    }

    pub fn store_user(&self, user: &User) -> Result<()> {
        self.set_json(keys::USER, user)
    }

    /// Load the user, apply `change`, and store the result if it applied.
    ///
    /// The whole cycle runs under a lock so concurrent updates through this
    /// repository cannot overwrite each other. Returns
    /// `Skipped(MissingUser)` when no user is stored.
    pub fn update_user<F>(&self, change: F) -> Result<Outcome>
    where
        F: FnOnce(&mut User) -> Outcome,
    {
        let _guard = self
            .user_lock
            .lock()
            .map_err(|_| AppError::Storage("User lock poisoned".to_string()))?;

        let Some(mut user) = self.get_user()? else {
            return Ok(Outcome::Skipped(SkipReason::MissingUser));
        };

        let outcome = change(&mut user);
        if outcome.is_applied() {
            self.store_user(&user)?;
        }
        Ok(outcome)
    }

    // ─── Auth Token Operations ───────────────────────────────────

    pub fn get_auth_token(&self) -> Result<Option<String>> {
        self.store.get(keys::AUTH_TOKEN)
    }

    pub fn store_auth_token(&self, token: &str) -> Result<()> {
        self.store.set(keys::AUTH_TOKEN, token.to_string())
    }

    pub fn remove_auth_token(&self) -> Result<()> {
        self.store.remove(keys::AUTH_TOKEN)
    }

    // ─── Catalog Operations ──────────────────────────────────────

    /// Stored programs; empty when none were stored.
    pub fn get_programs(&self) -> Result<Vec<RecoveryProgram>> {
        Ok(self.get_json(keys::PROGRAMS)?.unwrap_or_default())
    }

    pub fn store_programs(&self, programs: &[RecoveryProgram]) -> Result<()> {
        self.set_json(keys::PROGRAMS, programs)
    }

    /// Stored injuries; empty when none were stored.
    pub fn get_injuries(&self) -> Result<Vec<Injury>> {
        Ok(self.get_json(keys::INJURIES)?.unwrap_or_default())
    }

    pub fn store_injuries(&self, injuries: &[Injury]) -> Result<()> {
        self.set_json(keys::INJURIES, injuries)
    }

    // ─── Reminder Operations ─────────────────────────────────────

    pub fn get_reminders(&self) -> Result<Vec<Reminder>> {
        Ok(self.get_json(keys::REMINDERS)?.unwrap_or_default())
    }

    pub fn store_reminders(&self, reminders: &[Reminder]) -> Result<()> {
        self.set_json(keys::REMINDERS, reminders)
    }

    // ─── Logout ──────────────────────────────────────────────────

    /// Remove the user profile and auth token.
    ///
    /// Catalog data and reminders are kept for a faster re-login.
    pub fn clear_app_data(&self) -> Result<()> {
        self.store.remove(keys::USER)?;
        self.store.remove(keys::AUTH_TOKEN)?;
        tracing::info!("Cleared user data and auth token");
        Ok(())
    }
}
