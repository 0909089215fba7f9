//! Board entries, append payloads and the wire envelope of the board API.
//!
//! Every remote call answers with the same envelope shape:
//! `{ code, message, data: { board, expireAt, messages } }`, HTTP status
//! always 200. A non-200 `code` is an application-level rejection.

use base64::Engine;
use bytes::Bytes;
use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::session::BoardName;
use crate::error::{LocalError, RemoteError};

/// Application-level success code inside the envelope.
pub const SUCCESS_CODE: i64 = 200;

/// Wall-clock format the service uses for `expireAt`.
const EXPIRE_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Opaque entry identifier, assigned by the board service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One clipboard record of a board.
///
/// File entries carry only metadata; the bytes stay on the service and are
/// addressed through [`Entry::content_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Text { content: String },
    File { file_name: String, mime_type: String },
}

impl Entry {
    pub fn text(id: EntryId, content: impl Into<String>) -> Self {
        Self {
            id,
            kind: EntryKind::Text {
                content: content.into(),
            },
        }
    }

    pub fn file(id: EntryId, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id,
            kind: EntryKind::File {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
            },
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    /// Path under which the service serves this entry's content.
    pub fn content_path(&self, board: &BoardName) -> String {
        format!("/boardapi/{}/{}", board.as_str(), self.id)
    }
}

/// Full state of a board as returned by one remote call. Applied to local
/// state as a whole or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub entries: Vec<Entry>,
    pub expire_at: Option<NaiveDateTime>,
}

impl BoardSnapshot {
    /// The most recent entry, when the snapshot carries one. An append
    /// response holds exactly the created entry here.
    pub fn newest(&self) -> Option<&Entry> {
        self.entries.first()
    }
}

/// Content submitted to a board, before wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendPayload {
    Text(String),
    File {
        file_name: String,
        mime_type: String,
        data: Bytes,
    },
}

impl AppendPayload {
    pub fn text(content: impl Into<String>) -> Self {
        AppendPayload::Text(content.into())
    }

    pub fn file(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        AppendPayload::File {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Size checked against the configured ceiling: inline text byte
    /// length, or the raw (pre-base64) file byte length.
    pub fn size_bytes(&self) -> usize {
        match self {
            AppendPayload::Text(content) => content.len(),
            AppendPayload::File { data, .. } => data.len(),
        }
    }

    /// Trims text payloads. Empty input is a [`LocalError::EmptyInput`],
    /// which callers treat as a quiet no-op.
    pub fn normalized(self) -> Result<Self, LocalError> {
        match self {
            AppendPayload::Text(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Err(LocalError::EmptyInput)
                } else {
                    Ok(AppendPayload::Text(trimmed.to_string()))
                }
            }
            file @ AppendPayload::File { .. } => Ok(file),
        }
    }

    /// Wire form of the payload: text verbatim, files as
    /// `"{name}#data:{mime};base64,{payload}"`, the inline data-URL shape
    /// the service splits back apart on arrival.
    pub fn to_wire_content(&self) -> String {
        match self {
            AppendPayload::Text(content) => content.clone(),
            AppendPayload::File {
                file_name,
                mime_type,
                data,
            } => format!(
                "{}#data:{};base64,{}",
                file_name,
                mime_type,
                base64::engine::general_purpose::STANDARD.encode(data)
            ),
        }
    }
}

/// Request body of an append call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendRequest {
    pub content: String,
}

impl From<&AppendPayload> for AppendRequest {
    fn from(payload: &AppendPayload) -> Self {
        Self {
            content: payload.to_wire_content(),
        }
    }
}

/// Response envelope shared by every board API route.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<BoardInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardInfo {
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub expire_at: String,
    #[serde(default)]
    pub messages: Option<Vec<BoardMessage>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMessage {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub is_file: bool,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_name: String,
}

impl From<BoardMessage> for Entry {
    fn from(message: BoardMessage) -> Self {
        let id = EntryId::from(message.id);
        if message.is_file {
            Entry::file(id, message.file_name, message.file_type)
        } else {
            Entry::text(id, message.content)
        }
    }
}

impl ApiResponse {
    /// Converts the envelope into a snapshot, mapping a non-success code
    /// to [`RemoteError::Rejected`].
    pub fn into_snapshot(self) -> Result<BoardSnapshot, RemoteError> {
        if self.code != SUCCESS_CODE {
            return Err(RemoteError::Rejected {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        let info = self
            .data
            .ok_or_else(|| RemoteError::Protocol("envelope without data".to_string()))?;
        let entries = info
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(Entry::from)
            .collect();
        Ok(BoardSnapshot {
            entries,
            expire_at: parse_expire_at(&info.expire_at),
        })
    }
}

/// Parses the service's `expireAt` wall timestamp. The service sends an
/// empty string for a board that is gone or already expired.
pub fn parse_expire_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(raw, EXPIRE_AT_FORMAT) {
        Ok(at) => Some(at),
        Err(err) => {
            warn!("Unparseable expireAt {:?}: {}", raw, err);
            None
        }
    }
}
