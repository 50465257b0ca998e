//! Cached user list that is fully re-read after every mutation.

use roster_types::{User, UserId};
use tokio::sync::watch;
use tracing::debug;

use crate::error::ClientResult;
use crate::users::UserService;

pub struct UserStore {
    service: UserService,
    users: watch::Sender<Vec<User>>,
}

impl UserStore {
    pub fn new(service: UserService) -> Self {
        let (users, _) = watch::channel(Vec::new());
        Self { service, users }
    }

    /// Snapshot of the last list the server returned.
    pub fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    /// Receiver that is notified after every resync.
    pub fn subscribe(&self) -> watch::Receiver<Vec<User>> {
        self.users.subscribe()
    }

    /// Replaces the cache with the server's current list.
    ///
    /// Overlapping calls are not coordinated: whichever response lands last
    /// wins.
    pub async fn fetch_all(&self) -> ClientResult<Vec<User>> {
        let fresh = self.service.list().await?;
        debug!("user cache resynced with {} entries", fresh.len());
        self.users.send_replace(fresh.clone());
        Ok(fresh)
    }

    pub async fn add(&self, user: &User) -> ClientResult<Vec<User>> {
        self.service.create(user).await?;
        self.fetch_all().await
    }

    pub async fn edit(&self, id: UserId, user: &User) -> ClientResult<Vec<User>> {
        self.service.update(id, user).await?;
        self.fetch_all().await
    }

    pub async fn remove(&self, id: UserId) -> ClientResult<Vec<User>> {
        self.service.delete(id).await?;
        self.fetch_all().await
    }
}
