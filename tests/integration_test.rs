//! End-to-end tests: a real listener on an ephemeral port, the real client
//! library, whole sessions over the wire.

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;

use roost::client::Client;
use roost::config::ClientConfig;
use roost::config::RoostConfig;
use roost::config::ServerConfig;
use roost::proto::create_request::Flag;
use roost::proto::error_response::Code;
use roost::proto::roost_response::Message;
use roost::proto::watch_event::EventType;
use roost::proto::RoostRequest;
use roost::proto::RoostResponse;
use roost::server::serve_with_listener;
use roost::server::Node;

struct TestServer {
    endpoint: String,
    // Dropping this stops the listener.
    _shutdown: watch::Sender<()>,
}

async fn start_server(config: RoostConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let node = Node::new(config).unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    tokio::spawn(serve_with_listener(node, listener, shutdown_rx));

    TestServer {
        endpoint: format!("http://{addr}"),
        _shutdown: shutdown_tx,
    }
}

async fn connect(server: &TestServer) -> Client {
    connect_with(server, |builder| builder).await
}

async fn connect_with(
    server: &TestServer,
    configure: impl Fn(roost::client::ClientBuilder) -> roost::client::ClientBuilder,
) -> Client {
    // The listener task may still be warming up right after spawn.
    for _ in 0..20 {
        let builder = configure(Client::builder(&server.endpoint));
        match builder.build().await {
            Ok(client) => return client,
            Err(_) => tokio::time::sleep(Duration::from_millis(50)).await,
        }
    }
    panic!("server at {} never became reachable", server.endpoint);
}

/// Send every request with `interval` between them, half-close, then drain
/// the stream to completion.
async fn send_all_requests(
    mut client: Client,
    requests: Vec<RoostRequest>,
    interval: Duration,
) -> Vec<RoostResponse> {
    for request in requests {
        client.send(request).await.unwrap();
        tokio::time::sleep(interval).await;
    }
    client.close();

    let mut responses = Vec::new();
    while let Some(response) = client.recv().await.unwrap() {
        responses.push(response);
    }
    responses
}

fn messages(responses: Vec<RoostResponse>) -> Vec<Message> {
    responses
        .into_iter()
        .map(|r| r.message.expect("every frame carries a variant"))
        .collect()
}

#[tokio::test]
async fn test_create_then_get_data() {
    let server = start_server(RoostConfig::default()).await;
    let client = connect(&server).await;

    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/zoo", "Secrets hahahahaha!!", &[]),
            RoostRequest::create("/zoo/giraffe", "More secrets", &[]),
            RoostRequest::get_data("/zoo", false),
            RoostRequest::get_data("/zoo/giraffe", false),
        ],
        Duration::ZERO,
    )
    .await;

    let got = messages(responses);
    assert_eq!(got.len(), 4);
    match &got[0] {
        Message::Create(create) => assert_eq!(create.z_node_name, "/zoo"),
        other => panic!("unexpected response: {other:?}"),
    }
    match &got[1] {
        Message::Create(create) => assert_eq!(create.z_node_name, "/zoo/giraffe"),
        other => panic!("unexpected response: {other:?}"),
    }
    match &got[2] {
        Message::GetData(get) => {
            assert_eq!(get.data, b"Secrets hahahahaha!!".to_vec());
            assert_eq!(get.version, 0);
        }
        other => panic!("unexpected response: {other:?}"),
    }
    match &got[3] {
        Message::GetData(get) => {
            assert_eq!(get.data, b"More secrets".to_vec());
            assert_eq!(get.version, 0);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_watch_event_arrives_between_responses() {
    let server = start_server(RoostConfig::default()).await;
    let client = connect(&server).await;

    // Small gaps so the unsolicited watch event lands before the final read.
    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/zoo", "Secrets hahahahaha!!", &[]),
            RoostRequest::get_data("/zoo", true),
            RoostRequest::set_data("/zoo", "This one is better", 0),
            RoostRequest::get_data("/zoo", false),
        ],
        Duration::from_millis(50),
    )
    .await;

    let got = messages(responses);
    assert_eq!(got.len(), 5);
    assert!(matches!(&got[0], Message::Create(_)));
    match &got[1] {
        Message::GetData(get) => {
            assert_eq!(get.data, b"Secrets hahahahaha!!".to_vec());
            assert_eq!(get.version, 0);
        }
        other => panic!("unexpected response: {other:?}"),
    }
    assert!(matches!(&got[2], Message::SetData(_)));
    match &got[3] {
        Message::WatchEvent(event) => {
            assert_eq!(event.event_type, EventType::DataChanged as i32)
        }
        other => panic!("unexpected response: {other:?}"),
    }
    match &got[4] {
        Message::GetData(get) => {
            assert_eq!(get.data, b"This one is better".to_vec());
            assert_eq!(get.version, 1);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_heartbeat_keeps_connection_alive() {
    // Space the two requests wider than the server's idle window; only the
    // client's heartbeats keep the stream up.
    let config = RoostConfig {
        server: ServerConfig {
            stream_idle_timeout_ms: 500,
            ..ServerConfig::default()
        },
        client: ClientConfig {
            idle_timeout_ms: 300,
            ..ClientConfig::default()
        },
        ..RoostConfig::default()
    };
    let server = start_server(config).await;
    let client = connect_with(&server, |b| b.idle_timeout_ms(300)).await;

    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/zoo", "Secrets hahahahaha!!", &[]),
            RoostRequest::get_data("/zoo", false),
        ],
        Duration::from_millis(700),
    )
    .await;

    let got = messages(responses);
    assert_eq!(got.len(), 2);
    assert!(matches!(&got[0], Message::Create(_)));
    match &got[1] {
        Message::GetData(get) => assert_eq!(get.data, b"Secrets hahahahaha!!".to_vec()),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_ephemeral_node_dies_with_its_session() {
    let server = start_server(RoostConfig::default()).await;

    let client = connect(&server).await;
    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/zoo", "x", &[Flag::Ephemeral]),
            RoostRequest::get_data("/zoo", false),
        ],
        Duration::ZERO,
    )
    .await;
    let got = messages(responses);
    assert!(matches!(&got[0], Message::Create(_)));
    match &got[1] {
        Message::GetData(get) => assert_eq!(get.data, b"x".to_vec()),
        other => panic!("unexpected response: {other:?}"),
    }

    // The first stream is fully closed by now, so the node is gone.
    let client = connect(&server).await;
    let responses = send_all_requests(
        client,
        vec![RoostRequest::get_data("/zoo", false)],
        Duration::ZERO,
    )
    .await;
    match &messages(responses)[0] {
        Message::GetData(get) => {
            assert!(get.data.is_empty());
            assert_eq!(get.version, 0);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_manually_deleted_ephemeral_survives_session_close() {
    let server = start_server(RoostConfig::default()).await;

    let client = connect(&server).await;
    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/zoo", "Secrets hahahahaha!!", &[]),
            RoostRequest::create("/zoo/giraffe", "It's a tall animal", &[Flag::Ephemeral]),
            RoostRequest::get_data("/zoo/giraffe", false),
            RoostRequest::delete("/zoo/giraffe", 0),
        ],
        Duration::ZERO,
    )
    .await;
    let got = messages(responses);
    assert_eq!(got.len(), 4);
    match &got[2] {
        Message::GetData(get) => {
            assert_eq!(get.data, b"It's a tall animal".to_vec());
            assert_eq!(get.version, 0);
        }
        other => panic!("unexpected response: {other:?}"),
    }
    assert!(matches!(&got[3], Message::Delete(_)));

    // Closing the session after the manual delete must not error; the
    // standard parent survives, the ephemeral stays gone.
    let client = connect(&server).await;
    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::get_data("/zoo/giraffe", false),
            RoostRequest::exists("/zoo", false),
        ],
        Duration::ZERO,
    )
    .await;
    let got = messages(responses);
    match &got[0] {
        Message::GetData(get) => assert!(get.data.is_empty()),
        other => panic!("unexpected response: {other:?}"),
    }
    match &got[1] {
        Message::Exists(exists) => assert!(exists.exists),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_sequential_counter_advances_only_on_sequential_creates() {
    let server = start_server(RoostConfig::default()).await;
    let client = connect(&server).await;

    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/p", "", &[]),
            RoostRequest::create("/p/x", "", &[Flag::Sequential]),
            RoostRequest::create("/p/y", "", &[]),
            RoostRequest::create("/p/z", "", &[Flag::Sequential]),
            RoostRequest::get_children("/p", false),
        ],
        Duration::ZERO,
    )
    .await;

    let got = messages(responses);
    let names: Vec<&str> = got[1..4]
        .iter()
        .map(|m| match m {
            Message::Create(create) => create.z_node_name.as_str(),
            other => panic!("unexpected response: {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["/p/x_0", "/p/y", "/p/z_1"]);

    match &got[4] {
        Message::GetChildren(children) => {
            let mut children = children.children.clone();
            children.sort();
            assert_eq!(
                children,
                vec!["x_0".to_string(), "y".to_string(), "z_1".to_string()]
            );
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_request_errors_do_not_kill_the_stream() {
    let server = start_server(RoostConfig::default()).await;
    let client = connect(&server).await;

    let responses = send_all_requests(
        client,
        vec![
            RoostRequest::create("/zoo", "v0", &[]),
            // Wrong version: answered in-band, stream stays up.
            RoostRequest::set_data("/zoo", "v1", 41),
            RoostRequest::get_data("/zoo", false),
        ],
        Duration::ZERO,
    )
    .await;

    let got = messages(responses);
    assert_eq!(got.len(), 3);
    match &got[1] {
        Message::Error(err) => assert_eq!(err.code, Code::BadVersion as i32),
        other => panic!("unexpected response: {other:?}"),
    }
    match &got[2] {
        Message::GetData(get) => assert_eq!(get.data, b"v0".to_vec()),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_client_id_is_rejected() {
    let server = start_server(RoostConfig::default()).await;

    let _first = connect_with(&server, |b| b.client_id("duplicated")).await;
    let second = Client::builder(&server.endpoint)
        .client_id("duplicated")
        .build()
        .await;
    assert!(second.is_err());
}

#[tokio::test]
async fn test_silent_stream_is_reaped_with_its_ephemerals() {
    // Client heartbeat period (20s) far beyond the server idle window, so
    // the server terminates the stream and reaps the session's ephemerals.
    let config = RoostConfig {
        server: ServerConfig {
            stream_idle_timeout_ms: 300,
            ..ServerConfig::default()
        },
        ..RoostConfig::default()
    };
    let server = start_server(config).await;

    let mut client = connect_with(&server, |b| b.idle_timeout_ms(60_000)).await;
    client
        .send(RoostRequest::create("/zoo", "x", &[Flag::Ephemeral]))
        .await
        .unwrap();
    assert!(client.recv().await.unwrap().is_some());

    // Go silent until the server gives up on the stream.
    let mut saw_termination = false;
    for _ in 0..10 {
        match client.recv().await {
            Ok(Some(_)) => continue,
            _ => {
                saw_termination = true;
                break;
            }
        }
    }
    assert!(saw_termination, "server must terminate the idle stream");

    let probe = connect(&server).await;
    let responses = send_all_requests(
        probe,
        vec![RoostRequest::exists("/zoo", false)],
        Duration::ZERO,
    )
    .await;
    match &messages(responses)[0] {
        Message::Exists(exists) => assert!(!exists.exists),
        other => panic!("unexpected response: {other:?}"),
    }
}
