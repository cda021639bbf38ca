//! Credential directory — account lookup and profile mutation.

use chrono::{TimeZone, Utc};
use dashmap::DashMap;

use taskhub_core::account::{Account, Role};
use taskhub_core::error::AppError;

use crate::password::PasswordHasher;

/// Account lookup and mutation, behind a trait so tests can inject fakes
/// and the in-memory store can be swapped for a durable one.
pub trait CredentialStore: Send + Sync {
    /// Looks up an account by its unique login email.
    fn find_by_email(&self, email: &str) -> Option<Account>;

    /// Looks up an account by id.
    fn find_by_id(&self, id: i64) -> Option<Account>;

    /// Updates the display name and/or avatar of an account.
    fn update_profile(
        &self,
        id: i64,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Option<Account>;

    /// Returns all accounts.
    fn list(&self) -> Vec<Account>;
}

/// In-memory account directory backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    accounts: DashMap<i64, Account>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an account, replacing any existing one with the same id.
    pub fn insert(&self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    /// Creates a directory seeded with the demo accounts.
    ///
    /// All three accounts share the password `password123`; the hash is
    /// computed once at boot and reused, matching the seed data of the
    /// training deployment.
    pub fn with_demo_accounts(hasher: &PasswordHasher) -> Result<Self, AppError> {
        let hash = hasher.hash_password("password123")?;
        let directory = Self::new();

        directory.insert(Account {
            id: 1,
            email: "admin@cnss.bj".into(),
            password_hash: hash.clone(),
            name: "Administrateur CNSS".into(),
            role: Role::Admin,
            avatar: "https://ui-avatars.com/api/?name=Admin+CNSS&background=0D8ABC&color=fff"
                .into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default(),
        });
        directory.insert(Account {
            id: 2,
            email: "user@cnss.bj".into(),
            password_hash: hash.clone(),
            name: "Utilisateur Test".into(),
            role: Role::User,
            avatar: "https://ui-avatars.com/api/?name=User+Test&background=4ADE80&color=fff".into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).single().unwrap_or_default(),
        });
        directory.insert(Account {
            id: 3,
            email: "dev@cnss.bj".into(),
            password_hash: hash,
            name: "Développeur Frontend".into(),
            role: Role::Developer,
            avatar: "https://ui-avatars.com/api/?name=Dev+Frontend&background=61DAFB&color=000"
                .into(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).single().unwrap_or_default(),
        });

        Ok(directory)
    }
}

impl CredentialStore for InMemoryDirectory {
    fn find_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.clone())
    }

    fn find_by_id(&self, id: i64) -> Option<Account> {
        self.accounts.get(&id).map(|entry| entry.clone())
    }

    fn update_profile(
        &self,
        id: i64,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Option<Account> {
        let mut entry = self.accounts.get_mut(&id)?;
        if let Some(name) = name {
            entry.name = name;
        }
        if let Some(avatar) = avatar {
            entry.avatar = avatar;
        }
        Some(entry.clone())
    }

    fn list(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> =
            self.accounts.iter().map(|entry| entry.clone()).collect();
        accounts.sort_by_key(|a| a.id);
        accounts
    }
}
