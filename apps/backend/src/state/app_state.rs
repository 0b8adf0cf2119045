use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::notifications::{Notifier, PushSender};

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Post-commit notification dispatcher
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, notifier: Notifier) -> Self {
        Self {
            db,
            security,
            notifier,
        }
    }

    /// Test state: given connection, fixed test secret, given push sender.
    pub fn for_tests_with_sender(db: DatabaseConnection, sender: Arc<dyn PushSender>) -> Self {
        Self::new(db, SecurityConfig::for_tests(), Notifier::new(sender))
    }

    /// Test state that drops every notification.
    pub fn for_tests(db: DatabaseConnection) -> Self {
        Self::for_tests_with_sender(db, Arc::new(crate::notifications::NoopPushSender))
    }
}
