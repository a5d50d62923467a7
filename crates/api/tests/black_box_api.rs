use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use stockroom_infra::{Database, Services};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by a private in-memory database.
        let db = Database::in_memory().await.expect("in-memory database");
        let app = stockroom_api::app::build_app(Arc::new(Services::new(db)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    async fn post_empty(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    /// Products P1 and locations A, B.
    async fn with_basic_catalog(&self) {
        let (s, _) = self
            .post("/products/add", json!({ "product_id": "P1", "name": "Laptop" }))
            .await;
        assert_eq!(s, StatusCode::CREATED);
        for (id, name) in [("A", "Warehouse A"), ("B", "Store B")] {
            let (s, _) = self
                .post("/locations/add", json!({ "location_id": id, "name": name }))
                .await;
            assert_eq!(s, StatusCode::CREATED);
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_and_empty_dashboard() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (status, body) = srv.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "products": 0, "locations": 0, "movements": 0 }));
}

#[tokio::test]
async fn receipt_then_transfer_yields_two_balances() {
    let srv = TestServer::spawn().await;
    srv.with_basic_catalog().await;

    let (s, _) = srv
        .post(
            "/movements/add",
            json!({ "movement_id": "M1", "product_id": "P1", "to_location": "A", "qty": 50 }),
        )
        .await;
    assert_eq!(s, StatusCode::CREATED);
    let (s, _) = srv
        .post(
            "/movements/add",
            json!({
                "movement_id": "M2",
                "product_id": "P1",
                "from_location": "A",
                "to_location": "B",
                "qty": "10"
            }),
        )
        .await;
    assert_eq!(s, StatusCode::CREATED);

    let (status, body) = srv.get("/balance").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["balances"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["location_id"], "A");
    assert_eq!(rows[0]["balance"], 40);
    assert_eq!(rows[1]["location_id"], "B");
    assert_eq!(rows[1]["location_name"], "Store B");
    assert_eq!(rows[1]["balance"], 10);
}

#[tokio::test]
async fn invalid_movements_are_rejected_with_400() {
    let srv = TestServer::spawn().await;
    srv.with_basic_catalog().await;

    let cases = [
        json!({ "movement_id": "M1", "product_id": "P1", "to_location": "A", "qty": 0 }),
        json!({ "movement_id": "M1", "product_id": "P1", "to_location": "A", "qty": "lots" }),
        json!({
            "movement_id": "M1",
            "product_id": "P1",
            "from_location": "",
            "to_location": "",
            "qty": 3
        }),
        json!({ "movement_id": "M1", "product_id": "NOPE", "to_location": "A", "qty": 3 }),
        json!({ "product_id": "P1", "to_location": "A", "qty": 3 }),
    ];
    for body in cases {
        let (status, res) = srv.post("/movements/add", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body={body} res={res}");
        assert_eq!(res["error"], "validation_error");
    }

    let (_, dashboard) = srv.get("/").await;
    assert_eq!(dashboard["movements"], 0);
}

#[tokio::test]
async fn movement_requires_a_catalog() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv
        .post(
            "/movements/add",
            json!({ "movement_id": "M1", "product_id": "P1", "to_location": "A", "qty": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("add some products before creating movements")
    );
}

#[tokio::test]
async fn referenced_records_cannot_be_deleted_until_movements_are_cleared() {
    let srv = TestServer::spawn().await;
    srv.with_basic_catalog().await;

    for (id, qty) in [("M1", 5), ("M2", 7)] {
        let (s, _) = srv
            .post(
                "/movements/add",
                json!({ "movement_id": id, "product_id": "P1", "to_location": "A", "qty": qty }),
            )
            .await;
        assert_eq!(s, StatusCode::CREATED);
    }

    let (status, body) = srv.post_empty("/products/delete/P1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "in_use");
    assert_eq!(body["references"], 2);
    assert!(body["message"].as_str().unwrap().contains("\"Laptop\""));

    let (status, body) = srv.post_empty("/locations/delete/A").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["references"], 2);

    // B is unreferenced and goes straight away.
    let (status, _) = srv.post_empty("/locations/delete/B").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = srv.post_empty("/movements/delete-all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);
    assert_eq!(
        body["message"],
        "Successfully deleted 2 movements. You can now delete products and locations."
    );

    let (status, _) = srv.post_empty("/products/delete/P1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = srv.post_empty("/locations/delete/A").await;
    assert_eq!(status, StatusCode::OK);

    let (_, dashboard) = srv.get("/").await;
    assert_eq!(dashboard, json!({ "products": 0, "locations": 0, "movements": 0 }));
}

#[tokio::test]
async fn duplicate_ids_conflict_and_unknown_ids_are_404() {
    let srv = TestServer::spawn().await;
    srv.with_basic_catalog().await;

    let (status, body) = srv
        .post("/products/add", json!({ "product_id": "P1", "name": "Again" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, body) = srv.get("/products/P404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = srv.post_empty("/movements/delete/M404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = srv
        .post("/locations/edit/Z", json!({ "name": "Nowhere" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_keeps_id_and_search_filters() {
    let srv = TestServer::spawn().await;
    srv.with_basic_catalog().await;
    let (s, _) = srv
        .post(
            "/products/add",
            json!({ "product_id": "P2", "name": "Mouse", "description": "wireless" }),
        )
        .await;
    assert_eq!(s, StatusCode::CREATED);

    let (status, body) = srv
        .post(
            "/products/edit/P1",
            json!({ "product_id": "IGNORED", "name": "Laptop Pro" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully!");
    assert_eq!(body["product"]["product_id"], "P1");
    assert_eq!(body["product"]["name"], "Laptop Pro");

    let (status, body) = srv.get("/products?search=%20wire%20").await;
    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["product_id"], "P2");

    // Case-sensitive.
    let (_, body) = srv.get("/products?search=laptop").await;
    assert!(body["products"].as_array().unwrap().is_empty());

    let (_, body) = srv.get("/locations?search=Store").await;
    let locations = body["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0]["location_id"], "B");
}

#[tokio::test]
async fn movements_list_newest_first_with_names() {
    let srv = TestServer::spawn().await;
    srv.with_basic_catalog().await;

    for (id, ts) in [("M1", "2024-01-01T08:00:00Z"), ("M2", "2024-01-02T08:00:00Z")] {
        let (s, _) = srv
            .post(
                "/movements/add",
                json!({
                    "movement_id": id,
                    "product_id": "P1",
                    "to_location": "A",
                    "qty": 1,
                    "timestamp": ts
                }),
            )
            .await;
        assert_eq!(s, StatusCode::CREATED);
    }

    let (status, body) = srv.get("/movements").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["movements"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["movement_id"], "M2");
    assert_eq!(rows[0]["product_name"], "Laptop");
    assert_eq!(rows[0]["to_location_name"], "Warehouse A");
    assert_eq!(rows[0]["from_location"], Value::Null);

    let (_, body) = srv.get("/movements?search=Warehouse").await;
    assert_eq!(body["movements"].as_array().unwrap().len(), 2);

    let (status, body) = srv
        .post(
            "/movements/edit/M1",
            json!({ "product_id": "P1", "from_location": "A", "to_location": "B", "qty": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["movement"]["timestamp"], "2024-01-01T08:00:00+00:00");

    let (status, body) = srv.get("/movements/M1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from_location_name"], "Warehouse A");
    assert_eq!(body["to_location_name"], "Store B");
}
