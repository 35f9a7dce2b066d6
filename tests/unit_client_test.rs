// tests/unit_client_test.rs

#[path = "common/test_helpers.rs"]
mod test_helpers;

use munin_client::client::Connection;
use munin_client::{MuninError, core::protocol::UNKNOWN_SERVICE};
use test_helpers::{BrokenStream, ScriptedStream};

const GREETING: &str = "# munin node at blanquito.cientifico.net";

/// Builds a connected client over a scripted stream whose first line is the
/// standard greeting, followed by `lines`.
async fn connected(lines: &[&str]) -> Connection<ScriptedStream> {
    let mut script = vec![GREETING];
    script.extend_from_slice(lines);
    Connection::handshake(ScriptedStream::new(script))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_handshake_strips_greeting_prefix() {
    let conn = connected(&[]).await;
    assert_eq!(conn.host(), "blanquito.cientifico.net");
}

#[tokio::test]
async fn test_handshake_without_prefix_keeps_raw_line() {
    let conn = Connection::handshake(ScriptedStream::new(["plain greeting"]))
        .await
        .unwrap();
    assert_eq!(conn.host(), "plain greeting");
}

#[tokio::test]
async fn test_handshake_on_closed_stream_fails() {
    let err = Connection::handshake(ScriptedStream::new([]))
        .await
        .unwrap_err();
    assert!(matches!(err, MuninError::Handshake(_)));
}

#[tokio::test]
async fn test_handshake_on_broken_stream_fails() {
    let err = Connection::handshake(BrokenStream).await.unwrap_err();
    assert!(matches!(err, MuninError::Handshake(_)));
}

#[tokio::test]
async fn test_list_splits_single_line_into_metrics() {
    let stream = ScriptedStream::new([GREETING, "cpu load users processes"]);
    let sent = stream.sent();
    let mut conn = Connection::handshake(stream).await.unwrap();

    let metrics = conn.list().await.unwrap();
    assert_eq!(metrics, vec!["cpu", "load", "users", "processes"]);
    assert_eq!(*sent.lock().unwrap(), vec!["list"]);
}

#[tokio::test]
async fn test_list_node_sends_node_name() {
    let stream = ScriptedStream::new([GREETING, "cpu load"]);
    let sent = stream.sent();
    let mut conn = Connection::handshake(stream).await.unwrap();

    let metrics = conn.list_node("blanquito.cientifico.net").await.unwrap();
    assert_eq!(metrics, vec!["cpu", "load"]);
    assert_eq!(*sent.lock().unwrap(), vec!["list blanquito.cientifico.net"]);
}

#[tokio::test]
async fn test_nodes_reads_dot_terminated_body() {
    let mut conn = connected(&["host1", "host2", "."]).await;
    let nodes = conn.nodes().await.unwrap();
    assert_eq!(nodes, vec!["host1", "host2"]);
}

#[tokio::test]
async fn test_version_extracts_last_token() {
    let mut conn = connected(&["munin node on foo version: 2.0.19-3"]).await;
    assert_eq!(conn.version().await.unwrap(), "2.0.19-3");
}

#[tokio::test]
async fn test_config_parses_key_value_body() {
    let mut conn = connected(&[
        "graph_title Load average",
        "graph_args --base 1000 -l 0",
        "load.label load",
        ".",
    ])
    .await;

    let config = conn.config("load").await.unwrap();
    assert_eq!(config.len(), 3);
    assert_eq!(config["graph_title"], "Load average");
    assert_eq!(config["graph_args"], "--base 1000 -l 0");
    assert_eq!(config["load.label"], "load");
}

#[tokio::test]
async fn test_fetch_parses_values() {
    let stream = ScriptedStream::new([GREETING, "load.value 0.19", "."]);
    let sent = stream.sent();
    let mut conn = Connection::handshake(stream).await.unwrap();

    let data = conn.fetch("load").await.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data["load.value"], "0.19");
    assert_eq!(*sent.lock().unwrap(), vec!["fetch load"]);
}

#[tokio::test]
async fn test_config_unknown_metric_is_metric_not_found() {
    let mut conn = connected(&[UNKNOWN_SERVICE, "."]).await;
    let err = conn.config("tiopepe").await.unwrap_err();
    assert_eq!(err, MuninError::MetricNotFound);
}

#[tokio::test]
async fn test_fetch_unknown_metric_is_metric_not_found() {
    let mut conn = connected(&[UNKNOWN_SERVICE, "."]).await;
    let err = conn.fetch("tiopepe").await.unwrap_err();
    assert_eq!(err, MuninError::MetricNotFound);
}

#[tokio::test]
async fn test_fetch_empty_body_is_empty_mapping() {
    let mut conn = connected(&["."]).await;
    let data = conn.fetch("load").await.unwrap();
    assert!(data.is_empty());
}

#[tokio::test]
async fn test_fetch_unstuffs_dotted_keys() {
    let mut conn = connected(&["..hidden.value 1", "."]).await;
    let data = conn.fetch("hidden").await.unwrap();
    assert_eq!(data[".hidden.value"], "1");
}

#[tokio::test]
async fn test_unterminated_body_is_protocol_error() {
    let mut conn = connected(&["host1", "host2"]).await;
    let err = conn.nodes().await.unwrap_err();
    assert!(matches!(err, MuninError::Protocol(_)));
}

#[tokio::test]
async fn test_response_region_is_released_after_a_failed_read() {
    let mut conn = connected(&["host1"]).await;

    let err = conn.nodes().await.unwrap_err();
    assert!(matches!(err, MuninError::Protocol(_)));

    // The failed command's region must have closed; the next command gets a
    // fresh region and fails on the exhausted stream, not on region reuse.
    let err = conn.version().await.unwrap_err();
    assert_eq!(
        err,
        MuninError::Protocol("stream closed before the response line".to_string())
    );
}

#[tokio::test]
async fn test_sequential_commands_on_one_connection() {
    let mut conn = connected(&[
        "cpu load",
        "host1",
        ".",
        "munin node on host1 version: 2.0.19-3",
        "load.value 0.19",
        ".",
    ])
    .await;

    assert_eq!(conn.list().await.unwrap(), vec!["cpu", "load"]);
    assert_eq!(conn.nodes().await.unwrap(), vec!["host1"]);
    assert_eq!(conn.version().await.unwrap(), "2.0.19-3");
    let data = conn.fetch("load").await.unwrap();
    assert_eq!(data["load.value"], "0.19");
}
