use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::User;
use crate::error::UserError;
use crate::store::{Item, TableClient};
use crate::validators::is_email_valid;

/// Attribute the users table is keyed by.
pub const USER_KEY_ATTRIBUTE: &str = "email";

/// Result of a point lookup. An absent key comes back as a zero-valued user
/// with `found == false`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedUser {
    pub user: User,
    pub found: bool,
}

/// Domain-shaped access to the users table.
#[derive(Clone)]
pub struct UserClient {
    store: TableClient,
    table: String,
}

impl UserClient {
    pub fn new(store: TableClient, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Point lookup by email. An empty email can never be stored, so it is
    /// reported as not found without a store call.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn fetch_user(&self, email: &str) -> Result<FetchedUser, UserError> {
        if email.is_empty() {
            debug!("Empty email, nothing to fetch");
            return Ok(FetchedUser {
                user: User::default(),
                found: false,
            });
        }

        debug!("Sending request");
        let item = self
            .store
            .get_item(self.table.clone(), email.to_string())
            .await
            .map_err(UserError::FetchFailed)?;

        match item {
            Some(item) => Ok(FetchedUser {
                user: unmarshal(item)?,
                found: true,
            }),
            None => {
                debug!("User not found");
                Ok(FetchedUser {
                    user: User::default(),
                    found: false,
                })
            }
        }
    }

    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn fetch_users(&self) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        let items = self
            .store
            .scan(self.table.clone())
            .await
            .map_err(UserError::FetchFailed)?;

        let users = items.into_iter().map(unmarshal).collect::<Result<Vec<_>, _>>()?;
        info!(user_count = users.len(), "Listed users");
        Ok(users)
    }

    /// Decodes, validates and stores a new user.
    ///
    /// The existence check and the write are separate store calls, so two
    /// concurrent creates for one email can both succeed; the later write wins.
    #[instrument(skip(self, body), fields(table = %self.table))]
    pub async fn create_user(&self, body: &[u8]) -> Result<User, UserError> {
        let user: User = serde_json::from_slice(body).map_err(UserError::InvalidInput)?;

        if !is_email_valid(&user.email) {
            warn!(user_email = %user.email, "Validation failed: invalid email");
            return Err(UserError::InvalidEmail);
        }

        if self.fetch_user(&user.email).await?.found {
            warn!(user_email = %user.email, "User already exists");
            return Err(UserError::AlreadyExists);
        }

        self.put(&user).await?;
        info!(user_email = %user.email, "User created successfully");
        Ok(user)
    }

    /// Overwrites an existing user. The email in the body selects the record.
    #[instrument(skip(self, body), fields(table = %self.table))]
    pub async fn update_user(&self, body: &[u8]) -> Result<User, UserError> {
        let user: User = serde_json::from_slice(body).map_err(UserError::InvalidInput)?;

        if !self.fetch_user(&user.email).await?.found {
            warn!(user_email = %user.email, "User not found for update");
            return Err(UserError::NotFound);
        }

        self.put(&user).await?;
        info!(user_email = %user.email, "User updated successfully");
        Ok(user)
    }

    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn delete_user(&self, email: &str) -> Result<(), UserError> {
        debug!("Sending request");
        self.store
            .delete_item(self.table.clone(), email.to_string())
            .await
            .map_err(UserError::DeleteFailed)?;
        info!("User deleted");
        Ok(())
    }

    async fn put(&self, user: &User) -> Result<(), UserError> {
        let item = marshal(user)?;
        self.store
            .put_item(self.table.clone(), item)
            .await
            .map_err(UserError::WriteFailed)
    }
}

fn marshal(user: &User) -> Result<Item, UserError> {
    match serde_json::to_value(user) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => Err(UserError::MarshalFailed(format!(
            "expected an object, got {other}"
        ))),
        Err(e) => Err(UserError::MarshalFailed(e.to_string())),
    }
}

fn unmarshal(item: Item) -> Result<User, UserError> {
    serde_json::from_value(Value::Object(item)).map_err(UserError::UnmarshalFailed)
}
