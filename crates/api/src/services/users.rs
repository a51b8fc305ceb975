//! User registration and lookup.

use tracing::instrument;

use crate::db::{Collection, DocumentStore, Filter};
use crate::models::{User, UserCreate};

use super::{ServiceError, decode, encode};

/// Field that identifies a user across sign-ins.
const IDENTITY_KEY: [&str; 1] = ["firebaseUid"];

/// User service.
pub struct UserService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Return the user registered for `request.firebase_uid`, creating it if
    /// this is the first sign-in.
    ///
    /// An existing user is returned unchanged; the request's email and name
    /// are ignored. Concurrent calls for the same identity all return the
    /// same record.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the store fails.
    #[instrument(skip(self, request), fields(firebase_uid = %request.firebase_uid))]
    pub async fn find_or_create(&self, request: UserCreate) -> Result<User, ServiceError> {
        if let Some(existing) = self.find_by_identity(&request.firebase_uid).await? {
            return Ok(existing);
        }

        let user = User::new(request);
        let inserted = self
            .store
            .insert_unique(Collection::Users, encode(&user)?, &IDENTITY_KEY)
            .await?;

        if inserted {
            tracing::info!(user_id = %user.id, "User created");
            return Ok(user);
        }

        // Lost a race with a concurrent registration; return the winner.
        self.find_by_identity(&user.firebase_uid)
            .await?
            .ok_or(ServiceError::NotFound("User not found"))
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no user has this id.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: &str) -> Result<User, ServiceError> {
        let document = self
            .store
            .find_one(Collection::Users, &Filter::eq("id", id))
            .await?
            .ok_or(ServiceError::NotFound("User not found"))?;
        decode(document)
    }

    async fn find_by_identity(&self, firebase_uid: &str) -> Result<Option<User>, ServiceError> {
        self.store
            .find_one(Collection::Users, &Filter::eq(IDENTITY_KEY[0], firebase_uid))
            .await?
            .map(decode)
            .transpose()
    }
}
