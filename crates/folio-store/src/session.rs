//! # Session Store
//!
//! Holds the current user, if any, and mirrors it under the `user` key.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                                  │
//! │                                                                         │
//! │  load() ── reads `user` ──► Some(User) | None                           │
//! │                                                                         │
//! │  login(email, _)       ──► User derived from email ──► persisted        │
//! │  register(email, _, n) ──► new id from clock       ──► persisted        │
//! │  update_user(patch)    ──► merged into current     ──► persisted        │
//! │  logout() / withdraw() ──► current = None          ──► key removed      │
//! │                                                                         │
//! │  Passwords are accepted and dropped. Authentication is mocked.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use folio_core::clock::Clock;
use folio_core::validation::validate_login_email;
use folio_core::{User, UserPatch};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::events::{EventBus, SessionEvent, SubscriptionId};
use crate::keys::USER_KEY;
use crate::kv::{read_json, write_json, SharedKv};

/// The signed-in identity and its persisted copy.
#[derive(Debug)]
pub struct SessionStore {
    kv: SharedKv,
    clock: Arc<dyn Clock>,
    current: Option<User>,
    events: EventBus<SessionEvent>,
}

impl SessionStore {
    /// Restores the session from the `user` key.
    ///
    /// A missing record means nobody is signed in. A record that cannot be
    /// read or decoded is logged and treated the same way.
    pub fn load(kv: SharedKv, clock: Arc<dyn Clock>) -> Self {
        let current = match read_json::<User>(kv.as_ref(), USER_KEY) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable persisted user");
                None
            }
        };

        if let Some(user) = &current {
            info!(user_id = user.id, role = ?user.role, "Restored session");
        }

        SessionStore {
            kv,
            clock,
            current,
            events: EventBus::new(),
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    /// The current user, or [`StoreError::NotAuthenticated`].
    pub fn require_user(&self) -> StoreResult<&User> {
        self.current.as_ref().ok_or(StoreError::NotAuthenticated)
    }

    /// Signs in with an email address. Any password is accepted.
    ///
    /// ## Errors
    /// A validation error when the trimmed email is empty.
    pub fn login(&mut self, email: &str, _password: &str) -> StoreResult<User> {
        let email = email.trim();
        validate_login_email(email)?;

        let user = User::from_login_email(email);
        self.persist(&user)?;
        info!(user_id = user.id, role = ?user.role, "Logged in");

        self.current = Some(user.clone());
        self.events.emit(&SessionEvent::LoggedIn(user.clone()));
        Ok(user)
    }

    /// Creates an account and signs it in. The id comes from the clock.
    pub fn register(&mut self, email: &str, _password: &str, name: &str) -> StoreResult<User> {
        let user = User::registered(self.clock.now_millis(), email.trim(), name.trim());
        self.persist(&user)?;
        info!(user_id = user.id, "Registered");

        self.current = Some(user.clone());
        self.events.emit(&SessionEvent::Registered(user.clone()));
        Ok(user)
    }

    pub fn logout(&mut self) -> StoreResult<()> {
        self.end_session()?;
        info!("Logged out");
        self.events.emit(&SessionEvent::LoggedOut);
        Ok(())
    }

    /// Account withdrawal. Reviews and purchase history stay in place.
    pub fn withdraw(&mut self) -> StoreResult<()> {
        self.end_session()?;
        info!("Account withdrawn");
        self.events.emit(&SessionEvent::Withdrawn);
        Ok(())
    }

    /// Merges `patch` into the current user and re-persists it.
    pub fn update_user(&mut self, patch: UserPatch) -> StoreResult<User> {
        let mut user = self.require_user()?.clone();
        user.apply(patch);
        self.persist(&user)?;
        debug!(user_id = user.id, "Updated user");

        self.current = Some(user.clone());
        self.events.emit(&SessionEvent::Updated(user.clone()));
        Ok(user)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn persist(&self, user: &User) -> StoreResult<()> {
        write_json(self.kv.as_ref(), USER_KEY, user)
    }

    fn end_session(&mut self) -> StoreResult<()> {
        self.kv.remove(USER_KEY)?;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use chrono::NaiveDate;
    use folio_core::clock::FixedClock;
    use folio_core::Role;
    use std::sync::Mutex;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()))
    }

    fn store(kv: &SharedKv) -> SessionStore {
        SessionStore::load(Arc::clone(kv), clock())
    }

    #[test]
    fn test_login_roles() {
        let kv = MemoryKv::shared();
        let mut session = store(&kv);

        let admin = session.login("admin@example.com", "x").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name, "admin");
        assert!(session.is_admin());

        let bob = session.login("bob@example.com", "whatever").unwrap();
        assert_eq!(bob.role, Role::User);
        assert_eq!(bob.name, "bob");
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_login_rejects_blank_email() {
        let kv = MemoryKv::shared();
        let mut session = store(&kv);

        assert!(session.login("   ", "pw").is_err());
        assert!(!session.is_authenticated());
        assert_eq!(kv.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_session_survives_reload() {
        let kv = MemoryKv::shared();
        let user = store(&kv).login("reader@example.com", "pw").unwrap();

        let reloaded = store(&kv);
        assert_eq!(reloaded.current(), Some(&user));
    }

    #[test]
    fn test_logout_clears_persisted_user() {
        let kv = MemoryKv::shared();
        let mut session = store(&kv);
        session.login("reader@example.com", "pw").unwrap();

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(store(&kv).current().is_none());
    }

    #[test]
    fn test_register_uses_clock_for_id() {
        let kv = MemoryKv::shared();
        let clock = clock();
        let mut session = SessionStore::load(Arc::clone(&kv), Arc::clone(&clock));

        let user = session.register("new@example.com", "secret1", "New Reader").unwrap();
        assert_eq!(user.id, clock.now_millis());
        assert_eq!(user.role, Role::User);
        assert_eq!(user.name, "New Reader");
    }

    #[test]
    fn test_update_user_requires_session() {
        let kv = MemoryKv::shared();
        let mut session = store(&kv);
        let patch = UserPatch {
            name: Some("Kim".to_string()),
            email: None,
        };

        assert!(matches!(
            session.update_user(patch.clone()),
            Err(StoreError::NotAuthenticated)
        ));

        session.login("kim@example.com", "pw").unwrap();
        let updated = session.update_user(patch).unwrap();
        assert_eq!(updated.name, "Kim");
        assert_eq!(store(&kv).current().map(|u| u.name.as_str()), Some("Kim"));
    }

    #[test]
    fn test_corrupt_record_is_ignored() {
        let kv = MemoryKv::shared();
        kv.set(USER_KEY, "{\"id\":".to_string()).unwrap();

        let session = store(&kv);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_events_follow_mutations() {
        let kv = MemoryKv::shared();
        let mut session = store(&kv);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        session.subscribe(move |event| {
            if let Ok(mut events) = sink.lock() {
                events.push(event.clone());
            }
        });

        let user = session.login("bob@example.com", "pw").unwrap();
        session.withdraw().unwrap();
        // A failed mutation emits nothing.
        let _ = session.update_user(UserPatch::default());

        let events = seen.lock().unwrap();
        assert_eq!(*events, vec![SessionEvent::LoggedIn(user), SessionEvent::Withdrawn]);
    }
}
