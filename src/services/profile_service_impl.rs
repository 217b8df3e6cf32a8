//! `SeaORM` implementation of the `ProfileService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::Actor;
use crate::services::profile_service::{ProfileError, ProfileOverview, ProfileService};

pub struct SeaOrmProfileService {
    store: Store,
}

impl SeaOrmProfileService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileService for SeaOrmProfileService {
    async fn overview(&self, viewer: Option<&Actor>) -> Result<ProfileOverview, ProfileError> {
        // TODO: restrict `users` to the viewer once the profile template stops
        // rendering the member directory.
        let users = self.store.list_users().await?;

        let favorites = match viewer {
            Some(actor) => self.store.list_favorites(actor.id).await?,
            None => Vec::new(),
        };

        Ok(ProfileOverview { users, favorites })
    }
}
