// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local sign-in session.
//!
//! There is no account server: signing in with any non-blank credentials
//! stores an opaque token and, on first sign-in, the demo profile.

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::seed;

const TOKEN_PREFIX: &str = "mock-auth-token-";

#[derive(Clone)]
pub struct SessionService {
    storage: Storage,
}

impl SessionService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Sign in and return the new auth token.
    ///
    /// An existing stored profile is kept so progress survives re-login.
    pub fn login(&self, email: &str, password: &str) -> Result<String> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Please enter both email and password".to_string(),
            ));
        }

        let token = format!(
            "{}{}",
            TOKEN_PREFIX,
            chrono::Utc::now().timestamp_millis()
        );
        self.storage.store_auth_token(&token)?;

        if self.storage.get_user()?.is_none() {
            self.storage.store_user(&seed::demo_user())?;
            tracing::info!("Stored demo profile for new session");
        }

        tracing::info!("User signed in");
        Ok(token)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.storage.get_auth_token()?.is_some())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        self.storage.get_user()
    }

    /// Sign out: drop the profile and token, keep catalog and reminders.
    pub fn logout(&self) -> Result<()> {
        self.storage.clear_app_data()
    }
}
