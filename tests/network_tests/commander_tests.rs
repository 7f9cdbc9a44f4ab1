//! Tests for Commander
//!
//! These tests verify:
//! - Connection lifecycle and the close handshake
//! - Query/set exchanges against a scripted server
//! - Liveness checks, including after the server goes away
//! - Protocol faults surfacing as errors

#[path = "../common/mod.rs"]
mod common;

use std::net::TcpListener;
use std::time::{Duration, Instant};

use common::{frame, test_config, MockServer};
use matisse_commander::{Commander, Config, ControlStatus, MatisseError, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn connected(server: &MockServer) -> Commander {
    let mut commander = Commander::new(test_config(server));
    commander.connect().unwrap();
    commander
}

fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_not_connected_initially() {
    let commander = Commander::new(Config::default());
    assert!(!commander.is_connected());
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 30000);
    assert_eq!(config.timeout, Duration::from_secs(1));
    assert_eq!(config.close_delay, Duration::from_millis(300));
    assert_eq!(config.addr(), "localhost:30000");
}

#[test]
fn test_zero_timeout_rejected() {
    let err = Config::builder().timeout_ms(0).build().unwrap_err();
    assert!(matches!(err, MatisseError::Config(_)));

    let err = Config::builder().timeout(Duration::ZERO).build().unwrap_err();
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn test_connect_and_disconnect() {
    let mut server = MockServer::start();
    let mut commander = Commander::new(test_config(&server));

    commander.connect().unwrap();
    assert!(commander.is_connected());

    commander.disconnect().unwrap();
    assert!(!commander.is_connected());

    server.stop();
    assert_eq!(server.received(), vec!["Close_Network_Connection"]);
}

#[test]
fn test_connect_twice_is_noop() {
    let mut server = MockServer::start();
    let mut commander = connected(&server);

    commander.connect().unwrap();
    assert!(commander.is_connected());

    commander.disconnect().unwrap();
    server.stop();

    // A second socket would have produced a second handler; only one close was seen
    assert_eq!(server.received(), vec!["Close_Network_Connection"]);
}

#[test]
fn test_disconnect_when_not_connected_is_noop() {
    let mut commander = Commander::new(Config::default());
    let started = Instant::now();

    commander.disconnect().unwrap();

    assert!(!commander.is_connected());
    assert!(started.elapsed() < Duration::from_millis(300));
}

#[test]
fn test_disconnect_waits_close_delay() {
    let server = MockServer::start();
    let mut commander = connected(&server);

    let started = Instant::now();
    commander.disconnect_with_delay(Duration::from_millis(120)).unwrap();

    assert!(started.elapsed() >= Duration::from_millis(120));
}

#[test]
fn test_default_disconnect_uses_configured_delay() {
    let server = MockServer::start();
    let config = Config::builder()
        .host("127.0.0.1")
        .port(server.port())
        .timeout_ms(500)
        .build()
        .unwrap();
    let mut commander = Commander::new(config);
    commander.connect().unwrap();

    let started = Instant::now();
    commander.disconnect().unwrap();

    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[test]
fn test_disconnect_releases_socket_after_peer_closed() {
    let mut server = MockServer::start();
    let mut commander = connected(&server);
    server.stop();

    // The close notification may or may not reach a dead peer; either way the
    // socket must be gone afterwards.
    let _ = commander.disconnect();
    assert!(!commander.is_connected());

    let _ = commander.disconnect();
    assert!(!commander.is_connected());
}

#[test]
fn test_connect_refused() {
    let config = Config::builder()
        .host("127.0.0.1")
        .port(unused_port())
        .timeout_ms(200)
        .build()
        .unwrap();
    let mut commander = Commander::new(config);

    let err = commander.connect().unwrap_err();
    assert!(matches!(err, MatisseError::Connection(_)));
    assert!(!commander.is_connected());
}

#[test]
fn test_unresolvable_host() {
    let config = Config::builder()
        .host("no such host.invalid")
        .timeout_ms(200)
        .build()
        .unwrap();
    let mut commander = Commander::new(config);

    assert!(matches!(commander.connect(), Err(MatisseError::Connection(_))));
}

// =============================================================================
// Query/Set Tests
// =============================================================================

#[test]
fn test_query_exact_bytes() {
    let server = MockServer::start();
    server.expect_raw(b"\x00\x00\x00\x05*IDN?", &frame(b":IDN: \"Matisse TS\""));
    let mut commander = connected(&server);

    let value = commander.query("*IDN").unwrap();
    assert_eq!(value, Value::String("Matisse TS".to_string()));

    commander.disconnect().unwrap();
    assert!(server.mismatches().is_empty());
}

#[test]
fn test_query_strips_trailing_question_mark() {
    let server = MockServer::start();
    server.expect("SPZT:CNTRSTA?", ":SPZT:CNTRSTA: RUN");
    let mut commander = connected(&server);

    let value = commander.query("SPZT:CNTRSTA?").unwrap();
    assert_eq!(value, Value::Status(ControlStatus::Run));

    commander.disconnect().unwrap();
    assert!(server.mismatches().is_empty());
}

#[test]
fn test_sequential_queries_share_connection() {
    let server = MockServer::start();
    server.expect("MOTBI:POS?", ":MOTBI:POS: 1200");
    server.expect("FPZT:LOCK?", ":FPZT:LOCK: FALSE");
    let mut commander = connected(&server);

    assert_eq!(commander.query("MOTBI:POS").unwrap(), Value::Int(1200));
    assert_eq!(commander.query("FPZT:LOCK").unwrap(), Value::Bool(false));

    commander.disconnect().unwrap();
    assert_eq!(server.pending(), 0);
}

#[test]
fn test_set_float_acknowledged() {
    let server = MockServer::start();
    server.expect_raw(
        &frame(b"SPZT:NOW 0.30000"),
        b"\x00\x00\x00\x02OK",
    );
    let mut commander = connected(&server);

    assert!(commander.set("SPZT:NOW", 0.3).unwrap());

    commander.disconnect().unwrap();
    assert!(server.mismatches().is_empty());
}

#[test]
fn test_set_int_and_string() {
    let server = MockServer::start();
    server.expect("MOTBI:POS 1200", "OK");
    server.expect("SCAN:MODE 0", "OK");
    let mut commander = connected(&server);

    assert!(commander.set("MOTBI:POS", 1200).unwrap());
    assert!(commander.set("SCAN:MODE", "0").unwrap());

    commander.disconnect().unwrap();
}

#[test]
fn test_set_not_acknowledged_returns_false() {
    let server = MockServer::start();
    server.expect("SPZT:NOW 0.10000", "Error: 12");
    let mut commander = connected(&server);

    assert!(!commander.set("SPZT:NOW", 0.1).unwrap());
    commander.disconnect().unwrap();
}

#[test]
fn test_set_checked_reports_rejection() {
    let server = MockServer::start();
    server.expect("SPZT:NOW 0.10000", "NO");
    let mut commander = connected(&server);

    let err = commander.set_checked("SPZT:NOW", 0.1).unwrap_err();
    match err {
        MatisseError::SetRejected { variable, response } => {
            assert_eq!(variable, "SPZT:NOW");
            assert_eq!(response, "NO");
        }
        other => panic!("Expected SetRejected, got {:?}", other),
    }
    commander.disconnect().unwrap();
}

#[test]
fn test_send_returns_bytes_written() {
    let server = MockServer::start();
    server.expect("Connection Valid?", "Server alive");
    let mut commander = connected(&server);

    assert_eq!(commander.send("Connection Valid?").unwrap(), 21);
    assert_eq!(commander.receive().unwrap(), "Server alive");

    commander.disconnect().unwrap();
}

#[test]
fn test_operations_require_connection() {
    let mut commander = Commander::new(Config::default());

    assert!(matches!(commander.query("*IDN"), Err(MatisseError::NotConnected)));
    assert!(matches!(commander.set("SPZT:NOW", 0.1), Err(MatisseError::NotConnected)));
    assert!(matches!(commander.send("*IDN?"), Err(MatisseError::NotConnected)));
    assert!(matches!(commander.receive(), Err(MatisseError::NotConnected)));
}

// =============================================================================
// Protocol Fault Tests
// =============================================================================

#[test]
fn test_malformed_reply() {
    let server = MockServer::start();
    server.expect("X?", ":BAD");
    let mut commander = connected(&server);

    assert!(matches!(commander.query("X"), Err(MatisseError::MalformedEnvelope(_))));
    commander.disconnect().unwrap();
}

#[test]
fn test_unrecognized_reply() {
    let server = MockServer::start();
    server.expect("X?", ":X: MAYBE");
    let mut commander = connected(&server);

    assert!(matches!(
        commander.query("X"),
        Err(MatisseError::UnrecognizedValueShape(_))
    ));
    commander.disconnect().unwrap();
}

#[test]
fn test_peer_closes_before_header() {
    let server = MockServer::start();
    server.expect_raw_then_hang_up(&frame(b"X?"), b"\x00\x00");
    let mut commander = connected(&server);

    let err = commander.query("X").unwrap_err();
    assert!(matches!(err, MatisseError::Protocol(_)));
    let _ = commander.disconnect();
}

#[test]
fn test_peer_closes_mid_body() {
    let server = MockServer::start();
    server.expect_raw_then_hang_up(&frame(b"X?"), b"\x00\x00\x00\x0a:X: 1");
    let mut commander = connected(&server);

    let err = commander.query("X").unwrap_err();
    assert!(matches!(err, MatisseError::Protocol(_)));
    assert!(err.to_string().contains("Incomplete payload"));
    let _ = commander.disconnect();
}

#[test]
fn test_reply_timeout() {
    let server = MockServer::start();
    server.expect_raw(&frame(b"X?"), b"");
    let config = Config::builder()
        .host("127.0.0.1")
        .port(server.port())
        .timeout_ms(100)
        .close_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let mut commander = Commander::new(config);
    commander.connect().unwrap();

    let started = Instant::now();
    let err = commander.query("X").unwrap_err();

    assert!(matches!(err, MatisseError::Protocol(_)));
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(!commander.is_connected());
}

#[test]
fn test_late_reply_is_not_read_by_next_query() {
    let mut server = MockServer::start();
    server.expect_delayed(
        "REFCELL:NOW?",
        ":REFCELL:NOW: 3.50000e-01",
        Duration::from_millis(250),
    );
    let config = Config::builder()
        .host("127.0.0.1")
        .port(server.port())
        .timeout_ms(100)
        .close_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let mut commander = Commander::new(config);
    commander.connect().unwrap();

    assert!(matches!(
        commander.query("REFCELL:NOW"),
        Err(MatisseError::Protocol(_))
    ));
    assert!(!commander.is_connected());

    // The stale reply must not be taken as the answer to another variable
    assert!(matches!(
        commander.query("SPZT:NOW"),
        Err(MatisseError::NotConnected)
    ));

    server.stop();
    assert_eq!(server.received(), vec!["REFCELL:NOW?"]);
}

#[test]
fn test_reconnect_after_failed_exchange() {
    let mut server = MockServer::start();
    server.expect_raw_then_hang_up(&frame(b"X?"), b"\x00\x00");
    server.expect("X?", ":X: 7");
    let mut commander = connected(&server);

    assert!(commander.query("X").is_err());
    assert!(!commander.is_connected());

    commander.connect().unwrap();
    assert_eq!(commander.query("X").unwrap(), Value::Int(7));
    commander.disconnect().unwrap();

    server.stop();
    assert!(server.mismatches().is_empty());
}

// =============================================================================
// Liveness Tests
// =============================================================================

#[test]
fn test_server_alive_without_connection() {
    let mut commander = Commander::new(Config::default());
    assert!(!commander.server_alive());
}

#[test]
fn test_server_alive_with_active_connection() {
    let server = MockServer::start();
    server.expect_raw(
        b"\x00\x00\x00\x11Connection Valid?",
        b"\x00\x00\x00\x0cServer alive",
    );
    let mut commander = connected(&server);

    assert!(commander.server_alive());
    commander.disconnect().unwrap();
}

#[test]
fn test_server_alive_with_unexpected_reply() {
    let server = MockServer::start();
    server.expect("Connection Valid?", "Busy");
    let mut commander = connected(&server);

    assert!(!commander.server_alive());
    commander.disconnect().unwrap();
}

#[test]
fn test_server_alive_with_closed_connection() {
    let mut server = MockServer::start();
    server.expect("Connection Valid?", "Server alive");
    let mut commander = connected(&server);

    assert!(commander.server_alive());

    server.stop();

    assert!(!commander.server_alive());
    assert!(!commander.is_connected());
    assert!(!commander.server_alive());

    commander.disconnect().unwrap();
    assert!(!commander.is_connected());
}
