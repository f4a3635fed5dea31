//! In-memory key-value store run as an actor.
//!
//! [`TableActor`] owns every table and serves get/put/delete/scan requests
//! one at a time off an mpsc channel. [`TableClient`] is the cloneable handle
//! the rest of the system talks to; each call carries a oneshot channel for
//! its reply.

pub mod error;

pub use error::*;

use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. ITEMS AND MESSAGES
// =============================================================================

/// A stored record: attribute name to attribute value.
pub type Item = Map<String, Value>;

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    GetItem {
        table: String,
        key: String,
        respond_to: Response<Option<Item>>,
    },
    PutItem {
        table: String,
        item: Item,
        respond_to: Response<()>,
    },
    DeleteItem {
        table: String,
        key: String,
        respond_to: Response<()>,
    },
    Scan {
        table: String,
        respond_to: Response<Vec<Item>>,
    },
    Shutdown,
    #[cfg(test)]
    ItemCount {
        table: String,
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 2. THE ACTOR
// =============================================================================

struct Table {
    key_attribute: String,
    items: HashMap<String, Item>,
}

pub struct TableActor {
    receiver: mpsc::Receiver<StoreRequest>,
    tables: HashMap<String, Table>,
}

impl TableActor {
    pub fn new(buffer_size: usize) -> (Self, TableClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            tables: HashMap::new(),
        };
        (actor, TableClient::new(sender))
    }

    /// Registers a table whose items are keyed by `key_attribute`.
    pub fn with_table(mut self, name: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        self.tables.insert(
            name.into(),
            Table {
                key_attribute: key_attribute.into(),
                items: HashMap::new(),
            },
        );
        self
    }

    #[instrument(name = "table_actor", skip(self))]
    pub async fn run(mut self) {
        info!(tables = self.tables.len(), "TableActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::GetItem { table, key, respond_to } => {
                    let _ = respond_to.send(self.get_item(&table, &key));
                }
                StoreRequest::PutItem { table, item, respond_to } => {
                    let _ = respond_to.send(self.put_item(&table, item));
                }
                StoreRequest::DeleteItem { table, key, respond_to } => {
                    let _ = respond_to.send(self.delete_item(&table, &key));
                }
                StoreRequest::Scan { table, respond_to } => {
                    let _ = respond_to.send(self.scan(&table));
                }
                StoreRequest::Shutdown => {
                    info!("TableActor shutting down");
                    break;
                }
                #[cfg(test)]
                StoreRequest::ItemCount { table, respond_to } => {
                    let count = self.table(&table).map(|t| t.items.len());
                    let _ = respond_to.send(count);
                }
            }
        }

        info!("TableActor stopped");
    }

    fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    #[instrument(skip(self))]
    fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError> {
        let table = self.table(table)?;
        if key.is_empty() {
            warn!("Rejected get with empty key");
            return Err(StoreError::InvalidKey(format!("empty {}", table.key_attribute)));
        }
        let item = table.items.get(key).cloned();
        debug!(found = item.is_some(), "Processed get_item request");
        Ok(item)
    }

    #[instrument(skip(self, item))]
    fn put_item(&mut self, table: &str, item: Item) -> Result<(), StoreError> {
        let table = self.table_mut(table)?;
        let key = match item.get(&table.key_attribute).and_then(Value::as_str) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                warn!(key_attribute = %table.key_attribute, "Rejected put without key attribute");
                return Err(StoreError::InvalidKey(format!(
                    "missing {}",
                    table.key_attribute
                )));
            }
        };
        debug!(key = %key, "Processed put_item request");
        table.items.insert(key, item);
        Ok(())
    }

    /// Removing a key that is not there is a successful no-op.
    #[instrument(skip(self))]
    fn delete_item(&mut self, table: &str, key: &str) -> Result<(), StoreError> {
        let table = self.table_mut(table)?;
        if key.is_empty() {
            warn!("Rejected delete with empty key");
            return Err(StoreError::InvalidKey(format!("empty {}", table.key_attribute)));
        }
        let removed = table.items.remove(key).is_some();
        debug!(removed, "Processed delete_item request");
        Ok(())
    }

    #[instrument(skip(self))]
    fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let items: Vec<Item> = self.table(table)?.items.values().cloned().collect();
        debug!(item_count = items.len(), "Processed scan request");
        Ok(items)
    }
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, StoreError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| StoreError::Closed)?;

                response.await.map_err(|_| StoreError::Dropped)?
            }
        }
    };
}

#[derive(Clone)]
pub struct TableClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl TableClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::Closed)
    }
}

client_method!(TableClient => fn get_item(table: String, key: String) -> Option<Item> as StoreRequest::GetItem);
client_method!(TableClient => fn put_item(table: String, item: Item) -> () as StoreRequest::PutItem);
client_method!(TableClient => fn delete_item(table: String, key: String) -> () as StoreRequest::DeleteItem);
client_method!(TableClient => fn scan(table: String) -> Vec<Item> as StoreRequest::Scan);

#[cfg(test)]
client_method!(TableClient => fn item_count(table: String) -> usize as StoreRequest::ItemCount);
