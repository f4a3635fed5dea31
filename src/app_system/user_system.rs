use tracing::{error, info, instrument};

use super::config::Config;
use crate::clients::{UserClient, USER_KEY_ATTRIBUTE};
use crate::handlers::Router;
use crate::store::{TableActor, TableClient};

/// Owns the running store and the router wired to it.
///
/// The store client is created once here and handed to the accessor, which
/// the router holds; nothing is global.
pub struct UserSystem {
    pub router: Router,
    store_client: TableClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    #[instrument(name = "user_system", skip(config), fields(region = %config.region, table = %config.table_name))]
    pub fn new(config: &Config) -> Self {
        info!("Starting user system");

        let (store, store_client) = TableActor::new(config.buffer_size);
        let store = store.with_table(config.table_name.clone(), USER_KEY_ATTRIBUTE);
        let handles = vec![tokio::spawn(store.run())];

        let users = UserClient::new(store_client.clone(), config.table_name.clone());
        let router = Router::new(users);

        info!("User system started successfully");
        Self {
            router,
            store_client,
            handles,
        }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user system");

        if let Err(e) = self.store_client.shutdown().await {
            error!(error = %e, "Store shutdown request failed");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Actor task failed: {e}"));
            }
        }

        info!("User system shutdown complete");
        Ok(())
    }
}
