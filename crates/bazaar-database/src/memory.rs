//! In-memory credential store backed by `dashmap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use bazaar_core::error::AppError;
use bazaar_core::result::AppResult;
use bazaar_entity::user::{CreateUser, User};

use crate::repositories::user::UserStore;

/// In-memory [`UserStore`], cheap to clone and share between handlers.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<Uuid, User>>,
    /// Lowercased email to the id that registered it. An entry whose user is
    /// missing or removed no longer reserves the address.
    emails: Arc<DashMap<String, Uuid>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a fully-formed user record.
    pub fn insert(&self, user: User) {
        if !user.is_deleted() {
            self.emails.insert(user.email.to_lowercase(), user.id);
        }
        self.users.insert(user.id, user);
    }

    /// Apply an in-place modification to a stored user.
    ///
    /// Returns `false` if the user does not exist.
    pub fn modify(&self, id: Uuid, f: impl FnOnce(&mut User)) -> bool {
        match self.users.get_mut(&id) {
            Some(mut entry) => {
                f(entry.value_mut());
                entry.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Number of stored records, removed ones included.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find_live(&self, id: Uuid) -> Option<User> {
        self.users
            .get(&id)
            .filter(|u| !u.is_deleted())
            .map(|u| u.value().clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.find_live(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| !u.is_deleted() && u.email.eq_ignore_ascii_case(email))
            .map(|u| u.value().clone()))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: data.name,
            email: data.email.to_lowercase(),
            password_hash: data.password_hash,
            role: data.role,
            is_premium: false,
            active: true,
            password_changed_at: None,
            otp: None,
            otp_expires: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        // The entry guard stays held until the user is stored, so concurrent
        // creates for the same address serialize on it.
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(mut slot) => {
                if self.find_live(*slot.get()).is_some() {
                    return Err(AppError::conflict(format!(
                        "Email '{}' is already registered",
                        data.email
                    )));
                }
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
            }
            Entry::Vacant(slot) => {
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
            }
        }

        Ok(user)
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let found = self.modify(id, |u| {
            u.password_hash = password_hash.to_string();
            u.password_changed_at = Some(changed_at);
        });
        if !found {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<bool> {
        if self.find_live(id).is_none() {
            return Ok(false);
        }
        Ok(self.modify(id, |u| u.active = active))
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> AppResult<bool> {
        if self.find_live(id).is_none() {
            return Ok(false);
        }
        Ok(self.modify(id, |u| u.is_premium = is_premium))
    }
}
