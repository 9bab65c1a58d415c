//! Failure classification of the reqwest transport against local sockets.

use json_kv_codec::json;
use json_kv_store::{ClientOptions, HttpError, StoreClient};
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves `response` verbatim to every connection and returns the base URL.
async fn serve(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{}", addr)
}

fn client(timeout_secs: u64) -> StoreClient {
    StoreClient::new(ClientOptions::new().with_timeout_secs(timeout_secs)).unwrap()
}

#[tokio::test]
async fn malformed_url_is_bad_url() {
    let err = client(5).delete("not a url").await.unwrap_err();
    assert!(matches!(err, HttpError::BadUrl(_)), "got: {}", err);
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = client(5)
        .delete(&format!("http://127.0.0.1:{}/x", port))
        .await
        .unwrap_err();
    assert_eq!(err, HttpError::NetworkError);
}

#[tokio::test]
async fn silent_server_is_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let holder = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let client = StoreClient::with_transport(
        json_kv_store::ReqwestTransport::from_client(
            reqwest::Client::builder()
                .timeout(Duration::from_millis(200))
                .build()
                .unwrap(),
        ),
        ClientOptions::new(),
    );
    let err = client
        .get(&format!("http://{}/x", addr), &json::int().decoder())
        .await
        .unwrap_err();
    assert_eq!(err, HttpError::Timeout);
    holder.abort();
}

#[tokio::test]
async fn error_status_is_bad_status() {
    let base = serve("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let err = client(5)
        .insert(&format!("{}/x", base), &json!(1))
        .await
        .unwrap_err();
    assert_eq!(err, HttpError::BadStatus(404));
}

#[tokio::test]
async fn get_reads_the_envelope() {
    let body = r#"{"result":{"n":5}}"#;
    let response: &'static str = Box::leak(
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .into_boxed_str(),
    );
    let base = serve(response).await;
    let found = client(5)
        .get(&format!("{}/x", base), &json::dict(json::int()).decoder())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found["n"], 5);
}
