// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Platform notification capability.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Mutex;

use crate::error::Result;

/// Notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    #[default]
    Prompt,
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            "prompt" | "default" => Ok(Permission::Prompt),
            other => Err(format!("unknown notification permission '{}'", other)),
        }
    }
}

/// Something that can show a notification to the user.
pub trait Notifier: Send + Sync {
    /// Current permission state.
    fn permission(&self) -> Permission;

    /// Ask the user for permission and return the resulting state.
    fn request_permission(&self) -> Permission {
        self.permission()
    }

    /// Show a notification. Callers check `permission()` first.
    fn emit(&self, title: &str, body: &str) -> Result<()>;
}

/// Notifier that writes notifications to the structured log.
///
/// A `Prompt` permission is granted on request, as if the user accepted the
/// platform dialog.
#[derive(Debug, Default)]
pub struct LogNotifier {
    permission: Mutex<Permission>,
}

impl LogNotifier {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
        }
    }

    /// Change the permission, e.g. when the user revokes it in settings.
    pub fn set_permission(&self, permission: Permission) {
        if let Ok(mut current) = self.permission.lock() {
            *current = permission;
        }
    }
}

impl Notifier for LogNotifier {
    fn permission(&self) -> Permission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(Permission::Denied)
    }

    fn request_permission(&self) -> Permission {
        let Ok(mut current) = self.permission.lock() else {
            return Permission::Denied;
        };
        if *current == Permission::Prompt {
            *current = Permission::Granted;
            tracing::info!("Notification permission granted");
        }
        *current
    }

    fn emit(&self, title: &str, body: &str) -> Result<()> {
        tracing::info!(title, body, "Reminder notification");
        Ok(())
    }
}
