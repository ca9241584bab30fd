//! Memoized profile of the signed-in user. Fetched once per session and
//! dropped on sign-out.

use log::info;
use shared::UserInfo;
use tokio::sync::Mutex;

use super::{ApiError, PartnerApi};

#[derive(Debug, Default)]
pub struct SelfUserInfoCache {
    user: Mutex<Option<UserInfo>>,
}

impl SelfUserInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached profile, fetching it from `api` on first use
    pub async fn get_or_fetch(&self, api: &dyn PartnerApi) -> Result<UserInfo, ApiError> {
        let mut cached = self.user.lock().await;
        if let Some(user) = cached.as_ref() {
            return Ok(user.clone());
        }

        let user = api
            .get_user_info(None)
            .await?
            .ok_or_else(|| ApiError::NotFound("current user".to_string()))?;

        info!("👤 Cached profile for {} ({})", user.name, user.role);
        *cached = Some(user.clone());
        Ok(user)
    }

    pub async fn clear(&self) {
        *self.user.lock().await = None;
    }
}
