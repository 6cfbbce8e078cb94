//! Session store: bearer token plus cached user, persisted to client storage.
//!
//! One `SessionStore` is created per app and shared through context. It keeps
//! the single in-memory copy every view reads, writes through to storage, and
//! notifies subscribers on each change (the nav balance hangs off this).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::client::types::UserProfile;
use crate::format::Money;
use crate::storage::{SharedStore, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    /// Best-effort cache; `None` when never fetched or unreadable
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn balance(&self) -> Money {
        self.user.as_ref().map(|u| u.balance).unwrap_or_default()
    }

    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_staff)
    }
}

pub type ListenerId = usize;
type Listener = Rc<dyn Fn(Option<&Session>)>;

struct Inner {
    store: SharedStore,
    current: RefCell<Option<Session>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<ListenerId>,
}

/// Cheaply cloneable handle; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("signed_in", &self.token().is_some())
            .finish()
    }
}

impl SessionStore {
    /// Create a store and read whatever session storage already holds.
    pub fn new(store: SharedStore) -> Self {
        let this = Self {
            inner: Rc::new(Inner {
                store,
                current: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        };
        this.load();
        this
    }

    /// Re-read the session from storage, replacing the in-memory copy.
    pub fn load(&self) -> Option<Session> {
        let token = match self.inner.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                debug!("Session storage unavailable: {}", e);
                None
            }
        };

        let session = token.map(|token| Session {
            token,
            user: self.read_cached_user(),
        });
        *self.inner.current.borrow_mut() = session.clone();
        session
    }

    fn read_cached_user(&self) -> Option<UserProfile> {
        let raw = self.inner.store.get(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Discarding unreadable cached user: {}", e);
                None
            }
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .and_then(|s| s.user.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Persist a fresh session after login or registration.
    pub fn save(&self, token: &str, user: Option<UserProfile>) {
        if let Err(e) = self.inner.store.set(TOKEN_KEY, token) {
            warn!("Could not persist session token: {}", e);
        }
        self.persist_user(user.as_ref());
        *self.inner.current.borrow_mut() = Some(Session {
            token: token.to_string(),
            user,
        });
        self.notify();
    }

    /// Replace the cached user. Ignored when signed out.
    pub fn update_user(&self, user: UserProfile) {
        {
            let mut current = self.inner.current.borrow_mut();
            let Some(session) = current.as_mut() else {
                return;
            };
            session.user = Some(user.clone());
        }
        self.persist_user(Some(&user));
        self.notify();
    }

    /// Overwrite only the cached balance, keeping the rest of the user.
    pub fn merge_balance(&self, balance: Money) {
        if let Some(mut user) = self.user() {
            user.balance = balance;
            self.update_user(user);
        }
    }

    /// Forget the session in memory and in storage.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.inner.store.remove(key) {
                warn!("Could not clear {}: {}", key, e);
            }
        }
        *self.inner.current.borrow_mut() = None;
        self.notify();
    }

    fn persist_user(&self, user: Option<&UserProfile>) {
        let result = match user {
            Some(user) => match serde_json::to_string(user) {
                Ok(json) => self.inner.store.set(USER_KEY, &json),
                Err(e) => {
                    warn!("Could not serialize user: {}", e);
                    return;
                }
            },
            None => self.inner.store.remove(USER_KEY),
        };
        if let Err(e) = result {
            warn!("Could not persist cached user: {}", e);
        }
    }

    /// Call `listener` after every change. Returns an id for [`Self::unsubscribe`].
    pub fn subscribe(&self, listener: impl Fn(Option<&Session>) + 'static) -> ListenerId {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&self) {
        // Listeners may call back into the store
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        let snapshot = self.current();
        for listener in listeners {
            listener(snapshot.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, UnavailableStore};

    fn user(id: i64, balance: &str) -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "email": "user@survex.app",
            "balance": balance,
            "first_name": "Ada",
        }))
        .unwrap()
    }

    #[test]
    fn test_save_persists_and_reloads() {
        let backing = MemoryStore::new();
        let store = SessionStore::new(Rc::new(backing.clone()));
        store.save("abc", Some(user(1, "12.50")));

        assert_eq!(backing.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        let reopened = SessionStore::new(Rc::new(backing));
        let session = reopened.current().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.balance().to_string(), "12.50");
        assert_eq!(
            session.user.unwrap().extra.get("first_name"),
            Some(&serde_json::json!("Ada"))
        );
    }

    #[test]
    fn test_corrupt_cached_user_keeps_token() {
        let backing = MemoryStore::new();
        backing.set(TOKEN_KEY, "abc").unwrap();
        backing.set(USER_KEY, "{not json").unwrap();

        let store = SessionStore::new(Rc::new(backing));
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_clear_removes_everything() {
        let backing = MemoryStore::new();
        let store = SessionStore::new(Rc::new(backing.clone()));
        store.save("abc", Some(user(1, "1.00")));
        store.clear();

        assert!(!store.is_signed_in());
        assert!(backing.is_empty());
    }

    #[test]
    fn test_merge_balance_only_touches_balance() {
        let store = SessionStore::new(Rc::new(MemoryStore::new()));
        store.save("abc", Some(user(3, "1.00")));
        store.merge_balance(Money::from_cents(2575));

        let cached = store.user().unwrap();
        assert_eq!(cached.id, 3);
        assert_eq!(cached.balance.to_string(), "25.75");
    }

    #[test]
    fn test_update_user_ignored_when_signed_out() {
        let backing = MemoryStore::new();
        let store = SessionStore::new(Rc::new(backing.clone()));
        store.update_user(user(1, "5.00"));
        assert!(backing.is_empty());
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let store = SessionStore::new(Rc::new(MemoryStore::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let id = store.subscribe(move |session| {
            sink.borrow_mut().push(session.map(|s| s.token.clone()));
        });

        store.save("abc", None);
        store.clear();
        store.unsubscribe(id);
        store.save("later", None);

        assert_eq!(*seen.borrow(), vec![Some("abc".to_string()), None]);
    }

    #[test]
    fn test_unavailable_storage_keeps_memory_copy() {
        let store = SessionStore::new(Rc::new(UnavailableStore));
        assert!(!store.is_signed_in());
        store.save("abc", Some(user(1, "2.00")));
        assert_eq!(store.token().as_deref(), Some("abc"));
    }
}
