use std::sync::Arc;

use tracing::info;

use crate::addresses::dto::AddressDto;
use crate::addresses::repo::AddressStore;
use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::policy::{DeleteMode, EntityPolicy, Visibility};

/// Address CRUD. Deletion is configured hard: the row is removed outright
/// and there is no restore operation.
pub struct AddressService {
    store: Arc<dyn AddressStore>,
    policy: EntityPolicy,
}

impl AddressService {
    pub fn new(store: Arc<dyn AddressStore>) -> Self {
        Self {
            store,
            policy: EntityPolicy::new(Visibility::ActiveOnly, DeleteMode::Hard),
        }
    }

    pub async fn save(&self, dto: AddressDto) -> ServiceResult<AddressDto> {
        let mut address = dto.into_entity();
        address.active = true;
        let saved = self.store.save(address).await?;
        info!(address_id = saved.id, "address saved");
        Ok(AddressDto::from(&saved))
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<AddressDto> {
        let address = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Address, id))?;
        if !self.policy.visibility.allows(address.active) {
            return Err(ServiceError::Inactive {
                kind: EntityKind::Address,
                id,
            });
        }
        Ok(AddressDto::from(&address))
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<AddressDto>> {
        let addresses = self.store.find_all().await?;
        Ok(addresses
            .iter()
            .filter(|a| self.policy.visibility.allows(a.active))
            .map(AddressDto::from)
            .collect())
    }

    /// Update an existing address. A missing row is an explicit `NotFound`,
    /// checked before any field is touched.
    pub async fn update(&self, id: i64, dto: AddressDto) -> ServiceResult<AddressDto> {
        let mut address = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Address, id))?;

        dto.apply_to(&mut address);
        address.active = true;
        let saved = self.store.save(address).await?;
        info!(address_id = id, "address updated");
        Ok(AddressDto::from(&saved))
    }

    /// Remove the row, returning its pre-deletion snapshot.
    pub async fn delete_by_id(&self, id: i64) -> ServiceResult<AddressDto> {
        let address = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Address, id))?;
        let snapshot = AddressDto::from(&address);

        match self.policy.delete {
            DeleteMode::Hard => self.store.delete_by_id(id).await?,
            DeleteMode::Soft => {
                let mut address = address;
                address.active = false;
                self.store.save(address).await?;
            }
        }
        info!(address_id = id, mode = ?self.policy.delete, "address deleted");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryAddresses;

    fn service() -> AddressService {
        AddressService::new(Arc::new(MemoryAddresses::default()))
    }

    fn elm() -> AddressDto {
        AddressDto {
            id: None,
            street: "Elm".into(),
            number_house: 5,
            city: "Springfield".into(),
            postal_index: "00001".into(),
            active: false,
        }
    }

    #[tokio::test]
    async fn save_forces_active_and_assigns_id() {
        let svc = service();
        let saved = svc.save(elm()).await.expect("save");
        assert!(saved.active);
        assert!(saved.id.is_some());
        assert_eq!(saved.street, "Elm");
        assert_eq!(saved.number_house, 5);
    }

    #[tokio::test]
    async fn delete_returns_snapshot_then_get_is_not_found() {
        let svc = service();
        let saved = svc.save(elm()).await.unwrap();
        let id = saved.id.unwrap();

        let snapshot = svc.delete_by_id(id).await.expect("delete");
        assert_eq!(snapshot, saved);

        let err = svc.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
        assert_eq!(err.to_string(), format!("address {id} not found"));
    }

    #[tokio::test]
    async fn update_missing_address_is_not_found_not_a_fault() {
        let svc = service();
        let err = svc.update(1234, elm()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_replaces_fields_in_place() {
        let svc = service();
        let id = svc.save(elm()).await.unwrap().id.unwrap();

        let mut dto = elm();
        dto.street = "Birch".into();
        dto.number_house = 7;
        let updated = svc.update(id, dto).await.expect("update");
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.street, "Birch");
        assert_eq!(updated.number_house, 7);
        assert!(updated.active);
    }

    #[tokio::test]
    async fn get_all_returns_remaining_rows() {
        let svc = service();
        let first = svc.save(elm()).await.unwrap().id.unwrap();
        let mut other = elm();
        other.street = "Birch".into();
        svc.save(other).await.unwrap();

        svc.delete_by_id(first).await.unwrap();
        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].street, "Birch");
    }
}
