use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::policy::{DeleteMode, EntityPolicy, Visibility};
use crate::users::dto::UserDto;
use crate::users::repo::UserStore;

/// Administrative user operations, independent of the registration flow.
pub struct UserService {
    store: Arc<dyn UserStore>,
    policy: EntityPolicy,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            policy: EntityPolicy::new(Visibility::ActiveOnly, DeleteMode::Soft),
        }
    }

    pub fn with_policy(store: Arc<dyn UserStore>, policy: EntityPolicy) -> Self {
        Self { store, policy }
    }

    /// Persist a new user, forcing the active flag on. The store does not
    /// guarantee email uniqueness on its own, so the check runs here first.
    pub async fn save(&self, dto: UserDto) -> ServiceResult<UserDto> {
        if self.store.exists_by_email(&dto.email).await? {
            warn!(email = %dto.email, "email already in use");
            return Err(ServiceError::EmailTaken { email: dto.email });
        }

        let mut user = dto.into_entity();
        user.active = true;
        let saved = self.store.save(user).await?;
        info!(user_id = saved.id, email = %saved.email, "user saved");
        Ok(UserDto::from(&saved))
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<UserDto> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::User, id))?;
        if !self.policy.visibility.allows(user.active) {
            return Err(ServiceError::Inactive {
                kind: EntityKind::User,
                id,
            });
        }
        Ok(UserDto::from(&user))
    }

    pub async fn get_by_name(&self, user_name: &str) -> ServiceResult<UserDto> {
        let user = self
            .store
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                kind: EntityKind::User,
                key: user_name.to_string(),
            })?;
        Ok(UserDto::from(&user))
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<UserDto>> {
        let users = self.store.find_all().await?;
        Ok(users
            .iter()
            .filter(|u| self.policy.visibility.allows(u.active))
            .map(UserDto::from)
            .collect())
    }

    pub async fn update(&self, id: i64, dto: UserDto) -> ServiceResult<UserDto> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::User, id))?;

        dto.apply_to(&mut user);
        user.active = true;
        let saved = self.store.save(user).await?;
        info!(user_id = id, "user updated");
        Ok(UserDto::from(&saved))
    }

    /// Delete per the configured mode, returning the pre-mutation snapshot.
    pub async fn delete_by_id(&self, id: i64) -> ServiceResult<UserDto> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::User, id))?;
        let snapshot = UserDto::from(&user);

        match self.policy.delete {
            DeleteMode::Hard => self.store.delete_by_id(id).await?,
            DeleteMode::Soft => {
                let mut user = user;
                user.active = false;
                self.store.save(user).await?;
            }
        }
        info!(user_id = id, mode = ?self.policy.delete, "user deleted");
        Ok(snapshot)
    }

    pub async fn restore_by_id(&self, id: i64) -> ServiceResult<UserDto> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::User, id))?;
        user.active = true;
        let saved = self.store.save(user).await?;
        info!(user_id = id, "user restored");
        Ok(UserDto::from(&saved))
    }
}
