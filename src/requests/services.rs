use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::policy::{DeleteMode, EntityPolicy, Visibility};
use crate::requests::dto::UserRequestDto;
use crate::requests::repo::RequestStore;

/// Service-request CRUD. Deletion is configured soft: the row stays in
/// place with its active flag off and can be restored.
pub struct RequestService {
    store: Arc<dyn RequestStore>,
    policy: EntityPolicy,
}

impl RequestService {
    pub fn new(store: Arc<dyn RequestStore>) -> Self {
        Self {
            store,
            policy: EntityPolicy::new(Visibility::ActiveOnly, DeleteMode::Soft),
        }
    }

    pub async fn save(&self, dto: UserRequestDto) -> ServiceResult<UserRequestDto> {
        let mut request = dto.into_entity();
        request.active = true;
        let saved = self.store.save(request).await?;
        info!(request_id = saved.id, user_id = saved.user_id, "user request saved");
        Ok(UserRequestDto::from(&saved))
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<UserRequestDto> {
        let request = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::UserRequest, id))?;
        if !self.policy.visibility.allows(request.active) {
            return Err(ServiceError::Inactive {
                kind: EntityKind::UserRequest,
                id,
            });
        }
        Ok(UserRequestDto::from(&request))
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<UserRequestDto>> {
        let requests = self.store.find_all().await?;
        Ok(requests
            .iter()
            .filter(|r| self.policy.visibility.allows(r.active))
            .map(UserRequestDto::from)
            .collect())
    }

    /// Replace every mutable field and reactivate the request.
    pub async fn update(&self, id: i64, dto: UserRequestDto) -> ServiceResult<UserRequestDto> {
        let mut request = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::UserRequest, id))?;

        dto.apply_to(&mut request);
        request.active = true;
        let saved = self.store.save(request).await?;
        info!(request_id = id, "user request updated");
        Ok(UserRequestDto::from(&saved))
    }

    /// Delete per the configured mode, returning the pre-mutation snapshot.
    pub async fn delete_by_id(&self, id: i64) -> ServiceResult<UserRequestDto> {
        let request = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::UserRequest, id))?;
        let snapshot = UserRequestDto::from(&request);

        match self.policy.delete {
            DeleteMode::Hard => self.store.delete_by_id(id).await?,
            DeleteMode::Soft => {
                let mut request = request;
                request.active = false;
                self.store.save(request).await?;
            }
        }
        info!(request_id = id, mode = ?self.policy.delete, "user request deleted");
        Ok(snapshot)
    }

    pub async fn restore_by_id(&self, id: i64) -> ServiceResult<UserRequestDto> {
        let mut request = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::UserRequest, id))?;
        request.active = true;
        let saved = self.store.save(request).await?;
        info!(request_id = id, "user request restored");
        Ok(UserRequestDto::from(&saved))
    }

    /// Deferred feature hook. Photo attachments are accepted and dropped
    /// until the photo storage lands; callers must not see an error.
    // TODO: persist attachments through a photo store once one exists.
    pub fn attach_photo(&self, photo_url: &str, description: &str) {
        debug!(photo_url, description, "photo attachment ignored (not implemented)");
    }
}
