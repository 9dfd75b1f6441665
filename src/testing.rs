//! In-memory collaborators for tests and embedding without a database.
//! These back `AppState::in_memory()` and the `#[cfg(test)]` modules.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::addresses::repo::AddressStore;
use crate::addresses::repo_types::Address;
use crate::registration::codes::{CodeStore, ConfirmationCode};
use crate::registration::email::EmailDispatcher;
use crate::requests::repo::RequestStore;
use crate::requests::repo_types::UserRequest;
use crate::users::repo::UserStore;
use crate::users::repo_types::User;

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl MemoryUsers {
    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn save(&self, mut user: User) -> anyhow::Result<User> {
        if user.id == 0 {
            user.id = self.assign_id();
        }
        self.rows.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let mut rows: Vec<User> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.user_name == user_name)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

#[derive(Default)]
pub struct MemoryAddresses {
    rows: Mutex<HashMap<i64, Address>>,
    next_id: AtomicI64,
}

#[async_trait]
impl AddressStore for MemoryAddresses {
    async fn save(&self, mut address: Address) -> anyhow::Result<Address> {
        if address.id == 0 {
            address.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.rows.lock().unwrap().insert(address.id, address.clone());
        Ok(address)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Address>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Address>> {
        let mut rows: Vec<Address> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by_key(|a| a.id);
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRequests {
    rows: Mutex<HashMap<i64, UserRequest>>,
    next_id: AtomicI64,
}

#[async_trait]
impl RequestStore for MemoryRequests {
    async fn save(&self, mut request: UserRequest) -> anyhow::Result<UserRequest> {
        if request.id == 0 {
            request.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.rows.lock().unwrap().insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRequest>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<UserRequest>> {
        let mut rows: Vec<UserRequest> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCodes {
    rows: Mutex<HashMap<i64, ConfirmationCode>>,
    next_id: AtomicI64,
}

impl MemoryCodes {
    /// Force a stored code's expiry, for tests exercising the time boundary.
    pub fn expire(&self, id: i64, at: OffsetDateTime) {
        if let Some(code) = self.rows.lock().unwrap().get_mut(&id) {
            code.expires_at = at;
        }
    }
}

#[async_trait]
impl CodeStore for MemoryCodes {
    async fn save(&self, mut code: ConfirmationCode) -> anyhow::Result<ConfirmationCode> {
        if code.id == 0 {
            code.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.rows.lock().unwrap().insert(code.id, code.clone());
        Ok(code)
    }

    async fn find_by_user(&self, user_id: i64) -> anyhow::Result<Option<ConfirmationCode>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<ConfirmationCode>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn remove(&self, id: i64) -> anyhow::Result<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Records every dispatched confirmation as `(email, code)`.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDispatcher for RecordingMailer {
    async fn send_confirmation(&self, user: &User, code: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((user.email.clone(), code.to_string()));
        Ok(())
    }
}

/// Mailer that always fails, for exercising dispatch-error propagation.
pub struct FailingMailer;

#[async_trait]
impl EmailDispatcher for FailingMailer {
    async fn send_confirmation(&self, _user: &User, _code: &str) -> anyhow::Result<()> {
        anyhow::bail!("smtp relay unavailable")
    }
}
