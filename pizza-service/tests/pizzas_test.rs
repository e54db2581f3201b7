//! Pizza listing integration tests.

mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn list_pizzas_returns_every_row() {
    let app = TestApp::spawn().await;

    let response = app.get("/pizzas").await;
    assert_eq!(response.status(), 200);

    let body: Vec<Value> = response.json().await.unwrap();
    assert_eq!(body.len() as i64, app.count("pizzas").await);
}

#[tokio::test]
async fn list_pizzas_projects_summary_fields_in_id_order() {
    let app = TestApp::spawn().await;

    let body: Value = app.get("/pizzas").await.json().await.unwrap();
    assert_eq!(
        body[0],
        json!({ "id": 1, "name": "Emma", "ingredients": "Dough, Tomato Sauce, Cheese" })
    );

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    for pizza in body.as_array().unwrap() {
        assert_eq!(pizza.as_object().unwrap().len(), 3);
    }
}

#[tokio::test]
async fn list_pizzas_on_empty_store_is_empty_array() {
    let app = TestApp::spawn().await;

    sqlx::query("DELETE FROM restaurant_pizzas")
        .execute(app.db.pool())
        .await
        .unwrap();
    sqlx::query("DELETE FROM pizzas")
        .execute(app.db.pool())
        .await
        .unwrap();

    let body: Value = app.get("/pizzas").await.json().await.unwrap();
    assert_eq!(body, json!([]));
}
