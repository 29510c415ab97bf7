mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

async fn create_driver(app: &TestApp, label: &str) -> Result<i64> {
    let res = app
        .authed_json(Method::POST, "/api/drivers", &json!({ "name": common::unique(label) }))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    Ok(res.json()["id"].as_i64().expect("driver id"))
}

async fn create_work(app: &TestApp, body: Value) -> Result<Value> {
    let res = app.authed_json(Method::POST, "/api/works", &body).await?;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.json());
    Ok(res.json())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn driver_then_work_session_end_to_end() -> Result<()> {
    let app = common::database_app().await?;

    let res = app.authed_json(Method::POST, "/api/drivers", &json!({ "name": "A" })).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let driver = res.json();
    assert_eq!(driver["status"], "active");

    let work = create_work(
        &app,
        json!({
            "driver_id": driver["id"],
            "date": "2024-01-01",
            "start_time": "08:00",
            "end_time": "10:30"
        }),
    )
    .await?;
    assert_eq!(work["total_hours"], json!(2.5));
    assert!(work["total_km"].is_null());
    assert_eq!(work["date"], "2024-01-01");

    let res = app.get(&format!("/api/works/{}", work["id"])).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), work);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn distance_is_clamped_and_hours_are_not() -> Result<()> {
    let app = common::database_app().await?;
    let driver_id = create_driver(&app, "odometer").await?;

    let backwards = create_work(
        &app,
        json!({ "driver_id": driver_id, "date": "2024-02-01", "odometer_start": 100, "odometer_end": 80 }),
    )
    .await?;
    assert_eq!(backwards["total_km"], json!(0.0));

    // Numeric strings, as sent by HTML forms
    let forwards = create_work(
        &app,
        json!({ "driver_id": driver_id.to_string(), "date": "2024-02-02", "odometer_start": "80", "odometer_end": "130" }),
    )
    .await?;
    assert_eq!(forwards["total_km"], json!(50.0));

    let overnight = create_work(
        &app,
        json!({ "driver_id": driver_id, "date": "2024-02-03", "start_time": "22:00", "end_time": "02:00" }),
    )
    .await?;
    assert_eq!(overnight["total_hours"], json!(-20.0));
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn identical_session_is_rejected_as_duplicate() -> Result<()> {
    let app = common::database_app().await?;
    let driver_id = create_driver(&app, "duplicate").await?;

    let body = json!({
        "driver_id": driver_id,
        "date": "2024-03-01",
        "machine": "JCB-3DX",
        "start_time": "07:00",
        "end_time": "15:00",
        "odometer_start": 1200,
        "odometer_end": 1260,
        "location": "Quarry"
    });
    create_work(&app, body.clone()).await?;

    let res = app.authed_json(Method::POST, "/api/works", &body).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({ "error": "This entry already exists. Invalid." }));

    // Same tuple with absent optional fields also counts as a duplicate
    let sparse = json!({ "driver_id": driver_id, "date": "2024-03-02" });
    create_work(&app, sparse.clone()).await?;
    let res = app.authed_json(Method::POST, "/api/works", &sparse).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    // The check is read-then-write without locking; concurrent identical
    // creates are not covered here because both may legitimately succeed.
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn update_replaces_all_fields_and_recomputes() -> Result<()> {
    let app = common::database_app().await?;
    let driver_id = create_driver(&app, "update").await?;

    let work = create_work(
        &app,
        json!({
            "driver_id": driver_id,
            "date": "2024-04-01",
            "machine": "Tipper",
            "start_time": "09:00",
            "end_time": "17:00",
            "odometer_start": 10,
            "odometer_end": 40,
            "description": "Gravel run"
        }),
    )
    .await?;
    assert_eq!(work["total_hours"], json!(8.0));
    assert_eq!(work["total_km"], json!(30.0));

    let res = app
        .authed_json(
            Method::PUT,
            &format!("/api/works/{}", work["id"]),
            &json!({ "driver_id": driver_id, "date": "2024-04-02", "start_time": "09:00", "end_time": "12:15" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let updated = res.json();
    assert_eq!(updated["id"], work["id"]);
    assert_eq!(updated["date"], "2024-04-02");
    assert_eq!(updated["total_hours"], json!(3.25));
    assert!(updated["total_km"].is_null());
    assert!(updated["machine"].is_null());
    assert!(updated["odometer_start"].is_null());
    assert!(updated["description"].is_null());
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn write_validation() -> Result<()> {
    let app = common::database_app().await?;

    let res = app
        .authed_json(Method::POST, "/api/works", &json!({ "date": "2024-01-01" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({ "error": "driver_id & date required" }));

    let res = app
        .authed_json(Method::POST, "/api/works", &json!({ "driver_id": 999999999, "date": "2024-01-01" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({ "error": "Driver not found" }));

    let driver_id = create_driver(&app, "validation").await?;
    let res = app
        .authed_json(
            Method::POST,
            "/api/works",
            &json!({ "driver_id": driver_id, "date": "2024-01-01", "start_time": "8am", "end_time": "10:00" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .authed_json(Method::PUT, "/api/works/999999999", &json!({ "driver_id": driver_id, "date": "2024-01-01" }))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn delete_work_session() -> Result<()> {
    let app = common::database_app().await?;

    let res = app.authed_delete("/api/works/999999999").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({ "error": "Not found" }));

    let driver_id = create_driver(&app, "delete-work").await?;
    let work = create_work(&app, json!({ "driver_id": driver_id, "date": "2024-05-01" })).await?;
    let uri = format!("/api/works/{}", work["id"]);

    let res = app.authed_delete(&uri).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "success": true }));
    assert_eq!(app.get(&uri).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn list_filters_combine() -> Result<()> {
    let app = common::database_app().await?;
    let alice = create_driver(&app, "alice").await?;
    let bob = create_driver(&app, "bob").await?;

    let a1 = create_work(&app, json!({ "driver_id": alice, "date": "2023-06-01", "machine": "Roller" })).await?;
    let a2 = create_work(&app, json!({ "driver_id": alice, "date": "2023-06-15", "machine": "Tipper" })).await?;
    let a3 = create_work(&app, json!({ "driver_id": alice, "date": "2023-06-15", "machine": "Roller" })).await?;
    let a4 = create_work(&app, json!({ "driver_id": alice, "date": "2023-07-01" })).await?;
    create_work(&app, json!({ "driver_id": bob, "date": "2023-06-10" })).await?;

    let ids = |value: Value| -> Vec<Value> {
        value
            .as_array()
            .expect("array of sessions")
            .iter()
            .map(|w| w["id"].clone())
            .collect()
    };

    // Inclusive range, newest date first, later insert first within a date
    let res = app
        .get(&format!("/api/works?driverId={alice}&dateFrom=2023-06-01&dateTo=2023-06-15"))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(ids(body.clone()), vec![a3["id"].clone(), a2["id"].clone(), a1["id"].clone()]);
    assert!(body[0]["driver_name"].as_str().unwrap().starts_with("alice-"));

    let res = app
        .get(&format!("/api/works?driverId={alice}&machine=Roller&dateFrom=2023-06-02"))
        .await?;
    assert_eq!(ids(res.json()), vec![a3["id"].clone()]);

    let res = app.get(&format!("/api/works?driverId={alice}&dateFrom=2023-06-20&dateTo=")).await?;
    assert_eq!(ids(res.json()), vec![a4["id"].clone()]);

    let res = app.get("/api/works?dateFrom=June").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}
