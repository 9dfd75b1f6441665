use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::registration::codes::{CodeStore, ConfirmationCode};
use crate::registration::dto::RegisterRequest;
use crate::registration::email::EmailDispatcher;
use crate::registration::password::PasswordEncoder;
use crate::registration::roles::RoleProvider;
use crate::users::repo::UserStore;
use crate::users::repo_types::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Registration and confirmation flow. Moves a user between three states:
/// unregistered, pending confirmation (inactive row plus a live code) and
/// active. All collaborators are injected at construction.
pub struct RegistrationService {
    users: Arc<dyn UserStore>,
    codes: Arc<dyn CodeStore>,
    encoder: Arc<dyn PasswordEncoder>,
    roles: Arc<dyn RoleProvider>,
    mailer: Arc<dyn EmailDispatcher>,
    code_ttl_minutes: i64,
}

impl RegistrationService {
    pub fn new(
        users: Arc<dyn UserStore>,
        codes: Arc<dyn CodeStore>,
        encoder: Arc<dyn PasswordEncoder>,
        roles: Arc<dyn RoleProvider>,
        mailer: Arc<dyn EmailDispatcher>,
        code_ttl_minutes: i64,
    ) -> Self {
        Self {
            users,
            codes,
            encoder,
            roles,
            mailer,
            code_ttl_minutes,
        }
    }

    /// Register a new account or retry a pending one. Retrying an
    /// unconfirmed email replaces the pending code instead of erroring;
    /// an already-active email is a conflict and mutates nothing.
    pub async fn register(&self, mut req: RegisterRequest) -> ServiceResult<()> {
        req.email = req.email.trim().to_lowercase();

        if !is_valid_email(&req.email) {
            warn!(email = %req.email, "invalid email");
            return Err(ServiceError::Invalid("invalid email".into()));
        }
        if req.password.len() < 8 {
            warn!("password too short");
            return Err(ServiceError::Invalid("password too short".into()));
        }

        let mut user = match self.users.find_by_email(&req.email).await? {
            Some(existing) if existing.active => {
                warn!(email = %req.email, "email already registered");
                return Err(ServiceError::EmailTaken { email: req.email });
            }
            Some(existing) => {
                // Re-registration before confirmation: reuse the row and
                // supersede the pending code.
                if let Some(old) = self.codes.find_by_user(existing.id).await? {
                    self.codes.remove(old.id).await?;
                }
                existing
            }
            None => User {
                id: 0,
                user_name: req.user_name.clone(),
                email: req.email.clone(),
                password_hash: String::new(),
                active: false,
                roles: vec![self.roles.default_role()],
                created_at: OffsetDateTime::now_utc(),
            },
        };

        user.password_hash = self.encoder.encode(&req.password)?;
        user.active = false;
        let saved = self.users.save(user).await?;

        let code = ConfirmationCode::issue(saved.id, self.code_ttl_minutes);
        let code = self.codes.save(code).await?;

        self.mailer.send_confirmation(&saved, &code.code).await?;

        info!(user_id = saved.id, email = %saved.email, "registration pending confirmation");
        Ok(())
    }

    /// Activate the account a code belongs to. The code is usable strictly
    /// before its expiry instant and is removed once consumed, so a replay
    /// is rejected as unknown.
    pub async fn confirm(&self, code: &str) -> ServiceResult<String> {
        let pending = self
            .codes
            .find_by_code(code)
            .await?
            .ok_or(ServiceError::CodeNotFound)?;

        if !pending.is_valid_at(OffsetDateTime::now_utc()) {
            warn!(user_id = pending.user_id, "confirmation code expired");
            return Err(ServiceError::CodeExpired);
        }

        let mut user = self
            .users
            .find_by_id(pending.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::User, pending.user_id))?;
        user.active = true;
        let saved = self.users.save(user).await?;
        self.codes.remove(pending.id).await?;

        info!(user_id = saved.id, email = %saved.email, "account confirmed");
        Ok(format!("{} confirmed!", saved.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::password::Argon2Encoder;
    use crate::registration::roles::StaticRoles;
    use crate::testing::{FailingMailer, MemoryCodes, MemoryUsers, RecordingMailer};
    use time::Duration;

    struct Fixture {
        users: Arc<MemoryUsers>,
        codes: Arc<MemoryCodes>,
        mailer: Arc<RecordingMailer>,
        svc: RegistrationService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUsers::default());
        let codes = Arc::new(MemoryCodes::default());
        let mailer = Arc::new(RecordingMailer::default());
        let svc = RegistrationService::new(
            users.clone(),
            codes.clone(),
            Arc::new(Argon2Encoder),
            Arc::new(StaticRoles),
            mailer.clone(),
            30,
        );
        Fixture {
            users,
            codes,
            mailer,
            svc,
        }
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            user_name: "alice".into(),
            email: "a@x.com".into(),
            password: "pw-longenough".into(),
        }
    }

    #[tokio::test]
    async fn register_creates_inactive_user_with_code_and_email() {
        let f = fixture();
        f.svc.register(alice()).await.expect("register");

        let user = f
            .users
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .expect("user row");
        assert!(!user.active);
        assert_eq!(user.roles, vec!["ROLE_USER".to_string()]);
        assert!(Argon2Encoder::verify("pw-longenough", &user.password_hash).unwrap());

        let code = f.codes.find_by_user(user.id).await.unwrap().expect("code");
        assert_eq!(f.mailer.sent(), vec![("a@x.com".to_string(), code.code)]);
    }

    #[tokio::test]
    async fn reregistering_unconfirmed_email_replaces_the_code() {
        let f = fixture();
        f.svc.register(alice()).await.unwrap();
        let user_id = f.users.find_by_email("a@x.com").await.unwrap().unwrap().id;
        let first = f.codes.find_by_user(user_id).await.unwrap().unwrap();

        f.svc.register(alice()).await.expect("second register");

        assert_eq!(f.users.find_all().await.unwrap().len(), 1, "one user row");
        let second = f.codes.find_by_user(user_id).await.unwrap().unwrap();
        assert_ne!(second.code, first.code);
        assert!(
            f.codes.find_by_code(&first.code).await.unwrap().is_none(),
            "first code superseded"
        );
    }

    #[tokio::test]
    async fn registering_active_email_is_a_conflict_without_mutation() {
        let f = fixture();
        f.svc.register(alice()).await.unwrap();
        let code = live_code_for(&f, "a@x.com").await;
        f.svc.confirm(&code).await.unwrap();

        let err = f.svc.register(alice()).await.unwrap_err();
        assert!(matches!(err, ServiceError::EmailTaken { .. }));
        assert_eq!(f.users.find_all().await.unwrap().len(), 1);
        let user_id = f.users.find_by_email("a@x.com").await.unwrap().unwrap().id;
        assert!(f.codes.find_by_user(user_id).await.unwrap().is_none());
        assert_eq!(f.mailer.sent().len(), 1, "no second email");
    }

    #[tokio::test]
    async fn confirm_before_expiry_activates_and_removes_the_code() {
        let f = fixture();
        f.svc.register(alice()).await.unwrap();
        let user_id = f.users.find_by_email("a@x.com").await.unwrap().unwrap().id;
        let code = f.codes.find_by_user(user_id).await.unwrap().unwrap();

        let message = f.svc.confirm(&code.code).await.expect("confirm");
        assert_eq!(message, "a@x.com confirmed!");
        assert!(f.users.find_by_id(user_id).await.unwrap().unwrap().active);

        let replay = f.svc.confirm(&code.code).await.unwrap_err();
        assert!(matches!(replay, ServiceError::CodeNotFound));
    }

    #[tokio::test]
    async fn expired_code_is_rejected_and_user_stays_inactive() {
        let f = fixture();
        f.svc.register(alice()).await.unwrap();
        let user_id = f.users.find_by_email("a@x.com").await.unwrap().unwrap().id;
        let pending = f.codes.find_by_user(user_id).await.unwrap().unwrap();
        f.codes
            .expire(pending.id, OffsetDateTime::now_utc() - Duration::minutes(1));

        let err = f.svc.confirm(&pending.code).await.unwrap_err();
        assert!(matches!(err, ServiceError::CodeExpired));
        assert!(!f.users.find_by_id(user_id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let f = fixture();
        let err = f.svc.confirm("no-such-code").await.unwrap_err();
        assert!(matches!(err, ServiceError::CodeNotFound));
    }

    #[tokio::test]
    async fn email_dispatch_failure_propagates() {
        let users = Arc::new(MemoryUsers::default());
        let codes = Arc::new(MemoryCodes::default());
        let svc = RegistrationService::new(
            users.clone(),
            codes,
            Arc::new(Argon2Encoder),
            Arc::new(StaticRoles),
            Arc::new(FailingMailer),
            30,
        );

        let err = svc.register(alice()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
        let user = users.find_by_email("a@x.com").await.unwrap().unwrap();
        assert!(!user.active, "pending row stays inactive");
    }

    #[tokio::test]
    async fn rejects_malformed_email_and_short_password() {
        let f = fixture();

        let mut bad_email = alice();
        bad_email.email = "not-an-email".into();
        assert!(matches!(
            f.svc.register(bad_email).await.unwrap_err(),
            ServiceError::Invalid(_)
        ));

        let mut short = alice();
        short.password = "short".into();
        assert!(matches!(
            f.svc.register(short).await.unwrap_err(),
            ServiceError::Invalid(_)
        ));

        assert!(f.users.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn email_is_normalized_before_lookup() {
        let f = fixture();
        let mut shouty = alice();
        shouty.email = "  A@X.COM ".into();
        f.svc.register(shouty).await.unwrap();

        assert!(f.users.find_by_email("a@x.com").await.unwrap().is_some());

        // Same mailbox, different casing: still the retry path, not a new row.
        f.svc.register(alice()).await.unwrap();
        assert_eq!(f.users.find_all().await.unwrap().len(), 1);
    }

    async fn live_code_for(f: &Fixture, email: &str) -> String {
        let user = f.users.find_by_email(email).await.unwrap().unwrap();
        f.codes.find_by_user(user.id).await.unwrap().unwrap().code
    }
}
