use std::collections::{BTreeMap, HashSet};

use roster_types::{CredentialRecord, Credentials, User, UserId};
use serde::Deserialize;
use uuid::Uuid;

/// Session token issued by `login`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthToken(pub String);

/// An account that may log in, created at start-up.
#[derive(Deserialize, Clone, Debug)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

struct Account {
    email: String,
    password: String,
    user_id: UserId,
}

/// Users, login accounts and issued session tokens.
#[derive(Default)]
pub struct Directory {
    accounts: Vec<Account>,
    users: BTreeMap<UserId, User>,
    sessions: HashSet<AuthToken>,
    last_id: UserId,
}

impl Directory {
    pub fn new(seed: impl IntoIterator<Item = SeedAccount>) -> Self {
        let mut directory = Self::default();
        for account in seed {
            let user = User {
                name: account.name,
                email: Some(account.email.clone()),
                ..User::default()
            };
            let created = directory.create(user);
            directory.accounts.push(Account {
                email: account.email,
                password: account.password,
                user_id: created.id.unwrap_or_default(),
            });
        }
        directory
    }

    /// Issues a fresh token when the email/password pair matches an account.
    pub fn login(&mut self, credentials: &Credentials) -> Option<CredentialRecord> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.email == credentials.email && a.password == credentials.password)?;
        let user = self.users.get(&account.user_id).cloned()?;

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(AuthToken(token.clone()));
        Some(CredentialRecord { user, token })
    }

    pub fn is_session(&self, token: &str) -> bool {
        self.sessions.contains(&AuthToken(token.to_string()))
    }

    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.get(&id).cloned()
    }

    /// Stores `user` under the next id, ignoring any id it already carries.
    pub fn create(&mut self, mut user: User) -> User {
        self.last_id += 1;
        user.id = Some(self.last_id);
        self.users.insert(self.last_id, user.clone());
        user
    }

    pub fn update(&mut self, id: UserId, mut user: User) -> Option<User> {
        let slot = self.users.get_mut(&id)?;
        user.id = Some(id);
        *slot = user.clone();
        Some(user)
    }

    pub fn delete(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }
}
