use serde::{Deserialize, Serialize};

/// Engine configuration, typically embedded by the hosting page context.
///
/// Every field carries a serde default so a partial (or empty) JSON object
/// deserializes into a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    // 看板服务地址
    #[serde(default = "default_api_base")]
    pub api_base: String,
    // 请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    // 单条内容大小上限（字节）
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    // 兜底看板名
    #[serde(default = "default_board_name")]
    pub default_board: String,
    // 倒计时刷新间隔（毫秒）
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_api_base() -> String {
    "http://127.0.0.1:18128".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_payload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_board_name() -> String {
    "public".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            max_payload_bytes: default_max_payload_bytes(),
            default_board: default_board_name(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}
