//! HTTP-level integration tests for the region directory.

mod common;

use axum::http::StatusCode;
use common::{account, body_json, delete_auth, get_auth, post_json_auth, register};
use serde_json::json;

#[tokio::test]
async fn test_add_list_and_remove_own_regions() {
    let app = common::build_test_app();
    let me = account(&app, "penyuluh", "penyuluh", None).await;

    for wilayah in ["  Utara ", "Selatan"] {
        let response = post_json_auth(
            app.clone(),
            "/api/wilayah/penyuluh",
            json!({ "wilayah": wilayah }),
            &me.token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = body_json(get_auth(app.clone(), "/api/wilayah/penyuluh", &me.token).await).await;
    let labels: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["wilayah"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["Selatan", "Utara"]);

    let removed = delete_auth(app.clone(), "/api/wilayah/penyuluh/Utara", &me.token).await;
    assert_eq!(removed.status(), StatusCode::OK);

    // Removing again is not an error.
    let again = delete_auth(app.clone(), "/api/wilayah/penyuluh/Utara", &me.token).await;
    assert_eq!(again.status(), StatusCode::OK);

    let listed = body_json(get_auth(app, "/api/wilayah/penyuluh", &me.token).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_region_response_shape() {
    let app = common::build_test_app();
    let me = account(&app, "penyuluh", "penyuluh", None).await;

    let response = post_json_auth(
        app,
        "/api/wilayah/penyuluh",
        json!({ "wilayah": "Timur" }),
        &me.token,
    )
    .await;

    let json = body_json(response).await;
    assert!(json["message"].is_string());
    assert_eq!(json["wilayah"]["wilayah"], "Timur");
    assert_eq!(json["wilayah"]["penyuluh_id"], me.id.as_str());
}

#[tokio::test]
async fn test_blank_region_is_rejected() {
    let app = common::build_test_app();
    let me = account(&app, "penyuluh", "penyuluh", None).await;

    for body in [json!({ "wilayah": "   " }), json!({})] {
        let response =
            post_json_auth(app.clone(), "/api/wilayah/penyuluh", body, &me.token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_duplicate_region_conflicts() {
    let app = common::build_test_app();
    let me = account(&app, "penyuluh", "penyuluh", None).await;
    let body = json!({ "wilayah": "Barat" });

    let first = post_json_auth(app.clone(), "/api/wilayah/penyuluh", body.clone(), &me.token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(app, "/api/wilayah/penyuluh", body, &me.token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[tokio::test]
async fn test_only_penyuluh_records_regions() {
    let app = common::build_test_app();
    let kelompok = account(&app, "kelompok", "gapoktan", Some("Timur")).await;
    let konsultan = account(&app, "konsul", "konsultan_tani", Some("Timur")).await;

    for caller in [&kelompok, &konsultan] {
        let response = post_json_auth(
            app.clone(),
            "/api/wilayah/penyuluh",
            json!({ "wilayah": "Timur" }),
            &caller.token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }

    // Nobody was recorded as covering the region.
    let penyuluh =
        body_json(get_auth(app, "/api/wilayah/Timur/penyuluh", &kelompok.token).await).await;
    assert_eq!(penyuluh, json!([]));
}

#[tokio::test]
async fn test_lookups_by_region() {
    let app = common::build_test_app();
    let officer = account(&app, "officer", "penyuluh", None).await;
    register(app.clone(), "zaki", "konsultan_tani", Some("Timur")).await;
    register(app.clone(), "ayu", "konsultan_tani", Some("Timur")).await;
    register(app.clone(), "jauh", "konsultan_tani", Some("Barat")).await;
    register(app.clone(), "tani", "gapoktan", Some("Timur")).await;

    post_json_auth(
        app.clone(),
        "/api/wilayah/penyuluh",
        json!({ "wilayah": "Timur" }),
        &officer.token,
    )
    .await;

    let konsultan =
        body_json(get_auth(app.clone(), "/api/wilayah/Timur/konsultan", &officer.token).await)
            .await;
    let names: Vec<&str> = konsultan
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["ayu", "zaki"]);
    assert_eq!(konsultan[0]["email"], "ayu@test.com");
    assert_eq!(konsultan[0]["wilayah"], "Timur");

    let gapoktan =
        body_json(get_auth(app.clone(), "/api/wilayah/Timur/gapoktan", &officer.token).await)
            .await;
    assert_eq!(gapoktan.as_array().unwrap().len(), 1);
    assert_eq!(gapoktan[0]["name"], "tani");

    let penyuluh =
        body_json(get_auth(app, "/api/wilayah/Timur/penyuluh", &officer.token).await).await;
    let entries = penyuluh.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["penyuluh_id"], officer.id.as_str());
    assert_eq!(entries[0]["penyuluh"]["name"], "officer");
    assert_eq!(entries[0]["penyuluh"]["email"], "officer@test.com");
}

#[tokio::test]
async fn test_unknown_region_lists_nothing() {
    let app = common::build_test_app();
    let me = account(&app, "penyuluh", "penyuluh", None).await;

    let response = get_auth(app, "/api/wilayah/Antah/konsultan", &me.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
