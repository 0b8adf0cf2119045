use std::sync::Arc;

use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::notifications::{HttpPushSender, NoopPushSender, Notifier, PushSender};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances, used by main and tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
    push_gateway_url: Option<String>,
}

impl StateBuilder {
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            db_profile: DbProfile::Prod,
            push_gateway_url: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    /// Without a gateway URL notifications are dropped.
    pub fn with_push_gateway(mut self, url: Option<String>) -> Self {
        self.push_gateway_url = url;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = bootstrap_db(self.db_profile, DbOwner::App).await?;
        let sender: Arc<dyn PushSender> = match self.push_gateway_url {
            Some(url) => Arc::new(HttpPushSender::new(url)),
            None => Arc::new(NoopPushSender),
        };
        Ok(AppState::new(
            conn,
            self.security_config,
            Notifier::new(sender),
        ))
    }
}

pub fn build_state(security_config: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security_config)
}
