// Integration tests for `GreenhouseClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use verdant_api::model::{Actuator, OperationMode, SwitchState};
use verdant_api::{Error, GreenhouseClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GreenhouseClient) {
    let server = MockServer::start().await;
    let client = GreenhouseClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn sensor_body() -> serde_json::Value {
    json!({
        "air_temperature": 24.5,
        "air_humidity": 61.0,
        "light_intensity": 1250.0,
        "soil_humidity": 44.2,
        "soil_ph": 6.4,
        "soil_ec": 820.0,
        "soil_temperature": 19.8,
        "water_flow": 1.2,
        "water_amount": 34.7,
        "voltage": 229.9,
        "current": 1.4,
        "power": 310.0,
        "energy": 1530.0,
        "frequency": 50.0
    })
}

fn actuator_body() -> serde_json::Value {
    json!({
        "heater":     { "state": "on",  "percentage": 50,  "duty_cycle": 2048 },
        "light":      { "state": "off", "percentage": 0,   "duty_cycle": 0 },
        "fan":        { "state": "on",  "percentage": 100, "duty_cycle": 4095 },
        "water_pump": { "state": "off", "percentage": 25,  "duty_cycle": 1024 }
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn sensors_decodes_full_snapshot() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": sensor_body(),
        })))
        .mount(&server)
        .await;

    let snapshot = client.sensors().await.unwrap();

    assert_eq!(snapshot.air_temperature, 24.5);
    assert_eq!(snapshot.soil_ph, 6.4);
    assert_eq!(snapshot.frequency, 50.0);
}

#[tokio::test]
async fn actuators_decodes_all_four() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/actuators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": actuator_body(),
        })))
        .mount(&server)
        .await;

    let set = client.actuators().await.unwrap();

    assert_eq!(set.heater.state, SwitchState::On);
    assert_eq!(set.heater.duty_cycle, 2048);
    assert_eq!(set.get(Actuator::WaterPump).percentage, 25);
    assert_eq!(set.fan.duty_cycle, 4095);
}

#[tokio::test]
async fn operation_mode_decodes_mode_field() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/operation_mode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "mode": "autonomous",
        })))
        .mount(&server)
        .await;

    let mode = client.operation_mode().await.unwrap();
    assert_eq!(mode, OperationMode::Autonomous);
}

#[tokio::test]
async fn set_actuator_state_posts_state_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/actuators/water_pump"))
        .and(body_json(json!({ "state": "on" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_actuator_state(Actuator::WaterPump, SwitchState::On)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_actuator_power_posts_duty_cycle_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/actuators/heater"))
        .and(body_json(json!({ "duty_cycle": 2048 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_actuator_power(Actuator::Heater, 2048)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_operation_mode_adopts_backend_mode() {
    let (server, client) = setup().await;

    // The backend may settle on a different mode than requested; the
    // returned value is what callers must adopt.
    Mock::given(method("POST"))
        .and(path("/api/operation_mode"))
        .and(body_json(json!({ "mode": "autonomous" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "mode": "manual",
        })))
        .mount(&server)
        .await;

    let mode = client
        .set_operation_mode(OperationMode::Autonomous)
        .await
        .unwrap();
    assert_eq!(mode, OperationMode::Manual);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn backend_error_message_is_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/actuators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "sensor offline",
        })))
        .mount(&server)
        .await;

    let err = client.actuators().await.unwrap_err();

    assert!(err.is_backend());
    assert_eq!(err.to_string(), "sensor offline");
}

#[tokio::test]
async fn backend_error_without_message_uses_operation_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = client.sensors().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch sensors");

    Mock::given(method("POST"))
        .and(path("/api/actuators/fan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = client
        .set_actuator_state(Actuator::Fan, SwitchState::Off)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to control fan");
}

#[tokio::test]
async fn transport_failure_carries_connectivity_prefix() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server); // nothing is listening on the port anymore

    let client = GreenhouseClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();
    let err = client.sensors().await.unwrap_err();

    assert!(err.is_connectivity());
    assert!(
        err.to_string().starts_with("Failed to connect to backend:"),
        "unexpected message: {err}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_connectivity_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.sensors().await.unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }));
    assert!(err.is_connectivity());
    assert!(err.to_string().starts_with("Failed to connect to backend:"));
}
