#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::clients::{UserClient, USER_KEY_ATTRIBUTE};
    use crate::handlers::{Request, Response, Router};
    use crate::mock_framework::{create_mock_store, expect_delete, expect_get, expect_put, expect_scan};
    use crate::store::{StoreError, TableActor};

    fn start_router() -> Router {
        let (actor, store) = TableActor::new(10);
        tokio::spawn(actor.with_table("users", USER_KEY_ATTRIBUTE).run());
        Router::new(UserClient::new(store, "users"))
    }

    fn body_json(response: &Response) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    const UT: &str = r#"{"email":"u@test.com","firstName":"U","lastName":"T"}"#;

    #[tokio::test]
    async fn test_post_creates_user() {
        let router = start_router();

        let response = router.handle(&Request::new("POST").with_body(UT)).await;
        assert_eq!(response.status_code, 201);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(
            body_json(&response),
            json!({"email": "u@test.com", "firstName": "U", "lastName": "T"})
        );
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let router = start_router();
        router.handle(&Request::new("POST").with_body(UT)).await;

        let fetched = router
            .handle(&Request::new("GET").with_query("email", "u@test.com"))
            .await;
        assert_eq!(fetched.status_code, 200);
        assert_eq!(body_json(&fetched)["firstName"], "U");

        let updated = router
            .handle(&Request::new("PUT").with_body(
                r#"{"email":"u@test.com","firstName":"Una","lastName":"T"}"#,
            ))
            .await;
        assert_eq!(updated.status_code, 200);
        assert_eq!(body_json(&updated)["firstName"], "Una");

        let deleted = router
            .handle(&Request::new("DELETE").with_query("email", "u@test.com"))
            .await;
        assert_eq!(deleted.status_code, 200);
        assert_eq!(deleted.body, "null");

        let listed = router.handle(&Request::new("GET")).await;
        assert_eq!(listed.status_code, 200);
        assert_eq!(listed.body, "[]");
    }

    #[tokio::test]
    async fn test_get_missing_email_returns_zero_valued_user() {
        let router = start_router();

        let response = router
            .handle(&Request::new("GET").with_query("email", "missing@test.com"))
            .await;
        assert_eq!(response.status_code, 200);
        assert_eq!(
            body_json(&response),
            json!({"email": "", "firstName": "", "lastName": ""})
        );
    }

    #[tokio::test]
    async fn test_duplicate_post_is_rejected() {
        let router = start_router();
        router.handle(&Request::new("POST").with_body(UT)).await;

        let response = router
            .handle(&Request::new("POST").with_body(
                r#"{"email":"u@test.com","firstName":"Other","lastName":"Person"}"#,
            ))
            .await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"user already exists"}"#);

        let fetched = router
            .handle(&Request::new("GET").with_query("email", "u@test.com"))
            .await;
        assert_eq!(body_json(&fetched)["firstName"], "U");
    }

    #[tokio::test]
    async fn test_bad_bodies_are_400() {
        let router = start_router();

        let response = router.handle(&Request::new("POST").with_body("{")).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"invalid user data"}"#);

        let response = router
            .handle(&Request::new("POST").with_body(r#"{"email":"not-an-email"}"#))
            .await;
        assert_eq!(response.body, r#"{"error":"invalid email"}"#);

        let response = router.handle(&Request::new("PUT").with_body(UT)).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"user does not exist"}"#);
    }

    #[tokio::test]
    async fn test_put_without_email_is_not_found() {
        let (store, mut rx) = create_mock_store(10);
        let router = Router::new(UserClient::new(store, "users"));

        let response = router
            .handle(&Request::new("PUT").with_body(r#"{"firstName":"A"}"#))
            .await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"user does not exist"}"#);
        assert!(rx.try_recv().is_err(), "empty email never reaches the store");
    }

    #[tokio::test]
    async fn test_delete_absent_email_succeeds() {
        let router = start_router();
        let response = router
            .handle(&Request::new("DELETE").with_query("email", "ghost@test.com"))
            .await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "null");
    }

    #[tokio::test]
    async fn test_unknown_methods_are_405() {
        let router = start_router();

        for method in ["PATCH", "OPTIONS", "get", "NOT A METHOD", ""] {
            let response = router
                .handle(&Request::new(method).with_body(UT).with_query("email", "u@test.com"))
                .await;
            assert_eq!(response.status_code, 405, "method {method:?}");
            assert_eq!(response.body, r#""method not allowed""#);
        }
    }

    #[tokio::test]
    async fn test_store_failures_map_to_400() {
        let (store, mut rx) = create_mock_store(10);
        let router = Router::new(UserClient::new(store, "users"));

        let task = tokio::spawn({
            let router = router.clone();
            async move { router.handle(&Request::new("GET")).await }
        });
        let (table, responder) = expect_scan(&mut rx).await.expect("Expected Scan request");
        assert_eq!(table, "users");
        responder.send(Err(StoreError::Closed)).unwrap();
        let response = task.await.unwrap();
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"failed to fetch record"}"#);

        let task = tokio::spawn({
            let router = router.clone();
            async move {
                router
                    .handle(&Request::new("DELETE").with_query("email", "u@test.com"))
                    .await
            }
        });
        let (_, key, responder) = expect_delete(&mut rx).await.expect("Expected DeleteItem request");
        assert_eq!(key, "u@test.com");
        responder.send(Err(StoreError::Dropped)).unwrap();
        let response = task.await.unwrap();
        assert_eq!(response.body, r#"{"error":"could not delete item"}"#);
    }

    #[tokio::test]
    async fn test_create_checks_then_writes() {
        let (store, mut rx) = create_mock_store(10);
        let router = Router::new(UserClient::new(store, "users"));

        let task = tokio::spawn({
            let router = router.clone();
            async move { router.handle(&Request::new("POST").with_body(UT)).await }
        });

        let (_, key, responder) = expect_get(&mut rx).await.expect("Expected GetItem request");
        assert_eq!(key, "u@test.com");
        responder.send(Ok(None)).unwrap();

        let (table, item, responder) = expect_put(&mut rx).await.expect("Expected PutItem request");
        assert_eq!(table, "users");
        assert_eq!(Value::Object(item), serde_json::from_str::<Value>(UT).unwrap());
        responder
            .send(Err(StoreError::InvalidKey("missing email".into())))
            .unwrap();

        let response = task.await.unwrap();
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"could not put item"}"#);
    }

    #[tokio::test]
    async fn test_undecodable_stored_item() {
        let (store, mut rx) = create_mock_store(10);
        let router = Router::new(UserClient::new(store, "users"));

        let task = tokio::spawn({
            let router = router.clone();
            async move {
                router
                    .handle(&Request::new("GET").with_query("email", "u@test.com"))
                    .await
            }
        });

        let (_, _, responder) = expect_get(&mut rx).await.expect("Expected GetItem request");
        let Value::Object(item) = json!({"email": 42}) else {
            unreachable!()
        };
        responder.send(Ok(Some(item))).unwrap();

        let response = task.await.unwrap();
        assert_eq!(response.body, r#"{"error":"failed to unmarshal record"}"#);
    }

    #[tokio::test]
    async fn test_update_propagates_lookup_failure() {
        let (store, mut rx) = create_mock_store(10);
        let router = Router::new(UserClient::new(store, "users"));

        let task = tokio::spawn({
            let router = router.clone();
            async move { router.handle(&Request::new("PUT").with_body(UT)).await }
        });

        let (_, _, responder) = expect_get(&mut rx).await.expect("Expected GetItem request");
        responder.send(Err(StoreError::Closed)).unwrap();

        let response = task.await.unwrap();
        assert_eq!(response.body, r#"{"error":"failed to fetch record"}"#);
        assert!(rx.try_recv().is_err(), "no write after a failed lookup");
    }
}
