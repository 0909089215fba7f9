//! HTTP implementation of the board API.
//!
//! The service always answers HTTP 200 and signals failure through the
//! `code` field of the envelope, so transport status and application
//! status are mapped independently. This client holds no state across
//! calls beyond the connection pool.

use log::{debug, info};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::core::session::BoardName;
use crate::error::{RemoteError, RemoteResult};
use crate::interface::BoardApi;
use crate::message::{ApiResponse, AppendPayload, AppendRequest, BoardSnapshot, EntryId};

pub struct HttpBoardClient {
    http: reqwest::Client,
    api_base: String,
    max_payload_bytes: usize,
}

impl HttpBoardClient {
    pub fn new(config: &ClientConfig) -> RemoteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RemoteError::Unreachable(format!("构建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            max_payload_bytes: config.max_payload_bytes,
        })
    }

    fn board_url(&self, board: &BoardName) -> String {
        format!("{}/boardapi/{}", self.api_base, board.as_str())
    }

    fn entry_url(&self, board: &BoardName, id: &EntryId) -> String {
        format!("{}/{}", self.board_url(board), id)
    }

    async fn read_snapshot(response: reqwest::Response) -> RemoteResult<BoardSnapshot> {
        let envelope = response.json::<ApiResponse>().await?;
        envelope.into_snapshot()
    }
}

#[async_trait::async_trait]
impl BoardApi for HttpBoardClient {
    async fn fetch_board(&self, board: &BoardName) -> RemoteResult<BoardSnapshot> {
        let url = self.board_url(board);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        Self::read_snapshot(response).await
    }

    async fn append_entry(
        &self,
        board: &BoardName,
        payload: AppendPayload,
    ) -> RemoteResult<BoardSnapshot> {
        let size = payload.size_bytes();
        if size > self.max_payload_bytes {
            return Err(RemoteError::PayloadTooLarge {
                size,
                limit: self.max_payload_bytes,
            });
        }

        let url = self.board_url(board);
        let request = AppendRequest::from(&payload);
        info!("POST {} ({} bytes)", url, size);
        let response = self.http.post(&url).json(&request).send().await?;
        Self::read_snapshot(response).await
    }

    async fn delete_entry(&self, board: &BoardName, id: &EntryId) -> RemoteResult<BoardSnapshot> {
        let url = self.entry_url(board, id);
        info!("DELETE {}", url);
        let response = self.http.delete(&url).send().await?;
        Self::read_snapshot(response).await
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RemoteError::Unreachable("请求超时".to_string())
        } else if error.is_decode() {
            RemoteError::Protocol(error.to_string())
        } else {
            RemoteError::Unreachable(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::{Matcher, Server};

    fn build_client(api_base: String) -> HttpBoardClient {
        let config = ClientConfig {
            api_base,
            request_timeout_secs: 5,
            ..ClientConfig::default()
        };
        HttpBoardClient::new(&config).expect("client should build")
    }

    fn board_body(expire_at: &str, messages_json: &str) -> String {
        format!(
            r#"{{"code":200,"message":"success","data":{{"board":"demo","expireAt":"{}","messages":{}}}}}"#,
            expire_at, messages_json
        )
    }

    #[tokio::test]
    async fn fetch_board_parses_entries_and_expiry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/boardapi/demo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(board_body(
                "2026-08-06 18:00:00",
                r#"[{"id":"2","content":"latest","time":"","ip":"","isFile":false,"fileType":"text/plain","fileName":""},
                   {"id":"1","content":"","time":"","ip":"","isFile":true,"fileType":"image/png","fileName":"shot.png"}]"#,
            ))
            .create_async()
            .await;

        let client = build_client(server.url());
        let snapshot = client
            .fetch_board(&BoardName::from("demo"))
            .await
            .expect("board should be fetched");

        mock.assert_async().await;
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0].id, EntryId::from("2"));
        assert!(snapshot.entries[1].is_file());
        assert!(snapshot.expire_at.is_some());
    }

    #[tokio::test]
    async fn rejected_envelope_surfaces_code_and_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/boardapi/full")
            .with_status(200)
            .with_body(r#"{"code":400,"message":"board limit reached","data":null}"#)
            .create_async()
            .await;

        let client = build_client(server.url());
        let err = client
            .fetch_board(&BoardName::from("full"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err,
            RemoteError::Rejected {
                code: 400,
                message: "board limit reached".to_string()
            }
        );
    }

    #[tokio::test]
    async fn append_posts_the_wire_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/boardapi/demo")
            .match_body(Matcher::Json(serde_json::json!({"content": "hello"})))
            .with_status(200)
            .with_body(board_body(
                "2026-08-06 18:00:00",
                r#"[{"id":"9","content":"hello","time":"","ip":"","isFile":false,"fileType":"text/plain","fileName":""}]"#,
            ))
            .create_async()
            .await;

        let client = build_client(server.url());
        let snapshot = client
            .append_entry(&BoardName::from("demo"), AppendPayload::text("hello"))
            .await
            .expect("append should succeed");

        mock.assert_async().await;
        let newest = snapshot.newest().expect("appended entry present");
        assert_eq!(newest.id, EntryId::from("9"));
    }

    #[tokio::test]
    async fn oversized_payload_never_reaches_the_wire() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/boardapi/demo")
            .expect(0)
            .create_async()
            .await;

        let config = ClientConfig {
            api_base: server.url(),
            max_payload_bytes: 8,
            ..ClientConfig::default()
        };
        let client = HttpBoardClient::new(&config).unwrap();
        let payload = AppendPayload::file(
            "big.bin",
            "application/octet-stream",
            Bytes::from(vec![0u8; 9]),
        );
        let err = client
            .append_entry(&BoardName::from("demo"), payload)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err, RemoteError::PayloadTooLarge { size: 9, limit: 8 });
    }

    #[tokio::test]
    async fn delete_targets_the_entry_route() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/boardapi/demo/42")
            .with_status(200)
            .with_body(board_body("2026-08-06 18:00:00", "[]"))
            .create_async()
            .await;

        let client = build_client(server.url());
        let snapshot = client
            .delete_entry(&BoardName::from("demo"), &EntryId::from("42"))
            .await
            .expect("delete should succeed");

        mock.assert_async().await;
        assert!(snapshot.entries.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_protocol_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/boardapi/demo")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = build_client(server.url());
        let err = client
            .fetch_board(&BoardName::from("demo"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Protocol(_)));
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_unreachable() {
        // 端口 1 上无人监听
        let client = build_client("http://127.0.0.1:1".to_string());
        let err = client
            .fetch_board(&BoardName::from("demo"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unreachable(_)));
    }
}
