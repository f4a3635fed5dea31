//! # Mock Framework
//!
//! Utilities for testing the accessor and router without a running store.
//!
//! Use [`create_mock_store`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_put`] to assert the store
//! traffic and answer it, including with failures.

use crate::store::{Item, Response, StoreRequest, TableClient};
use tokio::sync::mpsc;

/// Creates a store client whose requests land on a receiver the test owns.
pub fn create_mock_store(buffer_size: usize) -> (TableClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetItem request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, String, Response<Option<Item>>)> {
    match receiver.recv().await {
        Some(StoreRequest::GetItem { table, key, respond_to }) => Some((table, key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a PutItem request
pub async fn expect_put(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Item, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::PutItem { table, item, respond_to }) => Some((table, item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a DeleteItem request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, String, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::DeleteItem { table, key, respond_to }) => Some((table, key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Scan request
pub async fn expect_scan(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Response<Vec<Item>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Scan { table, respond_to }) => Some((table, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store(10);

        let scan_task = tokio::spawn(async move { client.scan("users".to_string()).await });

        let (table, responder) = expect_scan(&mut receiver).await.expect("Expected Scan request");
        assert_eq!(table, "users");
        responder.send(Err(StoreError::TableNotFound(table))).unwrap();

        let result = scan_task.await.unwrap();
        assert_eq!(result, Err(StoreError::TableNotFound("users".to_string())));
    }
}
