//! Config - 環境変数からの設定
//!
//! | field | env | default |
//! |---|---|---|
//! | file_path | `REDEEM_FILE_PATH` | `./already-used.json` |
//! | database_path | `REDEEM_DATABASE_PATH` | `db.sqlite` |
//! | queue_name | `REDEEM_QUEUE_NAME` | `design-patterns-frws` |
//! | rabbit_host | `RABBIT_HOST` | (none) |
//! | rabbit_port | `RABBIT_PORT` | (none) |

use std::path::PathBuf;

use envconfig::Envconfig;

pub const DEFAULT_QUEUE_HOST: &str = "0.0.0.0";
pub const DEFAULT_QUEUE_PORT: u16 = 5672;

#[derive(Envconfig, Debug, Clone)]
pub struct SinkConfig {
    #[envconfig(from = "REDEEM_FILE_PATH", default = "./already-used.json")]
    pub file_path: PathBuf,

    #[envconfig(from = "REDEEM_DATABASE_PATH", default = "db.sqlite")]
    pub database_path: PathBuf,

    #[envconfig(from = "REDEEM_QUEUE_NAME", default = "design-patterns-frws")]
    pub queue_name: String,

    #[envconfig(from = "RABBIT_HOST")]
    pub rabbit_host: Option<String>,

    #[envconfig(from = "RABBIT_PORT")]
    pub rabbit_port: Option<u16>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("./already-used.json"),
            database_path: PathBuf::from("db.sqlite"),
            queue_name: "design-patterns-frws".to_string(),
            rabbit_host: None,
            rabbit_port: None,
        }
    }
}

/// QueueTarget は AMQP の接続先
///
/// 既定値 `0.0.0.0:5672` に host / port の上書きをそれぞれ独立に適用します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTarget {
    pub host: String,
    pub port: u16,
}

impl QueueTarget {
    pub fn resolve(config: &SinkConfig) -> Self {
        Self {
            host: config
                .rabbit_host
                .clone()
                .unwrap_or_else(|| DEFAULT_QUEUE_HOST.to_string()),
            port: config.rabbit_port.unwrap_or(DEFAULT_QUEUE_PORT),
        }
    }

    /// guest/guest, vhost `/`
    pub fn amqp_uri(&self) -> String {
        format!("amqp://{}:{}/%2f", self.host, self.port)
    }
}
