mod common;

use axum_test::TestServer;
use plz_geocoder::api;

#[tokio::test]
async fn test_coordsys_lists_registry() {
    let state = common::create_test_state(common::default_geocoder());
    let server = TestServer::new(api::routes::routes().with_state(state)).unwrap();

    let response = server.get("/api/coordsys").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["ok"], true);
    assert_eq!(json["default"], "latlon");

    let systems = json["systems"].as_array().unwrap();
    let keys: Vec<&str> = systems.iter().map(|s| s["key"].as_str().unwrap()).collect();
    assert_eq!(keys, ["latlon", "utm32", "utm33", "gk2", "gk3", "gk4", "gk5"]);

    assert_eq!(systems[0]["epsg"], "EPSG:4326");
    assert_eq!(systems[1]["epsg"], "EPSG:25832");
    assert!(systems.iter().all(|s| s["name"].is_string()));
}

#[tokio::test]
async fn test_coordsys_does_not_touch_geocoder() {
    let geocoder = common::default_geocoder();
    let state = common::create_test_state(geocoder.clone());
    let server = TestServer::new(api::routes::routes().with_state(state)).unwrap();

    server.get("/api/coordsys").await.assert_status_ok();

    assert_eq!(geocoder.calls(), 0);
}
