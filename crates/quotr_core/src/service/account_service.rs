//! Account registration and principal resolution.
//!
//! Stands in for the authentication collaborator: a username either
//! resolves to a [`Principal`] or the caller is unauthenticated.

use crate::model::user::{Principal, User};
use crate::repo::user_repo::UserRepository;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::CatalogResult;
use log::{info, warn};

pub struct AccountService<R: UserRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: UserRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: UserRepository, C: Clock> AccountService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Registers a new user; usernames are trimmed and must be unique.
    pub fn register_user(&self, username: &str) -> CatalogResult<User> {
        let user = self
            .repo
            .create_user(username, self.clock.now_epoch_ms())?;
        info!(
            "event=user_register module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Resolves a username to a principal.
    ///
    /// Returns `Ok(None)` for unknown users, meaning "unauthenticated".
    pub fn resolve_principal(&self, username: &str) -> CatalogResult<Option<Principal>> {
        let user = self.repo.find_by_username(username)?;
        if user.is_none() {
            warn!("event=principal_resolve module=service status=error error_code=unknown_user");
        }
        Ok(user.map(Principal::from))
    }
}
