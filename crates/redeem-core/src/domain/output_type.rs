//! OutputType - どの Sink に記録するかを選ぶタグ
//!
//! # タグ
//! - `CONSOLE` / `FILE` / `DATABASE`（別名 `DB`）/ `QUEUE` / `NULL`
//! - 完全一致のみ（`file` や ` QUEUE ` は未知のタグ扱い）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OutputType は閉じた列挙
///
/// 未知のタグの扱いは 2 通り用意しています。
/// - `FromStr`: 厳密に解析し、未知なら `UnknownOutputType`
/// - `from_tag`: 未知なら `Console` にフォールバック（SinkFactory の既定動作）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputType {
    Console,
    File,
    Database,
    Queue,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output type '{0}'")]
pub struct UnknownOutputType(pub String);

impl OutputType {
    /// 全ての OutputType（HealthChecker の巡回順）
    pub const ALL: [OutputType; 5] = [
        OutputType::Console,
        OutputType::File,
        OutputType::Database,
        OutputType::Queue,
        OutputType::Null,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Console => "CONSOLE",
            OutputType::File => "FILE",
            OutputType::Database => "DATABASE",
            OutputType::Queue => "QUEUE",
            OutputType::Null => "NULL",
        }
    }

    /// タグを解析し、未知なら Console を返す
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse() {
            Ok(output) => output,
            Err(UnknownOutputType(tag)) => {
                tracing::warn!(%tag, "unknown output type, falling back to CONSOLE");
                OutputType::Console
            }
        }
    }
}

impl FromStr for OutputType {
    type Err = UnknownOutputType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONSOLE" => Ok(OutputType::Console),
            "FILE" => Ok(OutputType::File),
            "DATABASE" | "DB" => Ok(OutputType::Database),
            "QUEUE" => Ok(OutputType::Queue),
            "NULL" => Ok(OutputType::Null),
            _ => Err(UnknownOutputType(s.to_string())),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::console("CONSOLE", OutputType::Console)]
    #[case::file("FILE", OutputType::File)]
    #[case::database("DATABASE", OutputType::Database)]
    #[case::db_alias("DB", OutputType::Database)]
    #[case::queue("QUEUE", OutputType::Queue)]
    #[case::null("NULL", OutputType::Null)]
    fn parses_known_tags(#[case] tag: &str, #[case] expected: OutputType) {
        assert_eq!(tag.parse::<OutputType>(), Ok(expected));
    }

    #[test]
    fn strict_parse_rejects_unknown_tag() {
        let err = "SMOKE_SIGNAL".parse::<OutputType>().unwrap_err();
        assert_eq!(err, UnknownOutputType("SMOKE_SIGNAL".to_string()));
    }

    #[rstest]
    #[case::lowercase("file")]
    #[case::padded(" QUEUE ")]
    #[case::mixed_case("Db")]
    fn tags_are_matched_exactly(#[case] tag: &str) {
        assert!(tag.parse::<OutputType>().is_err());
        assert_eq!(OutputType::from_tag(tag), OutputType::Console);
    }

    #[test]
    fn from_tag_falls_back_to_console() {
        assert_eq!(OutputType::from_tag("SMOKE_SIGNAL"), OutputType::Console);
        assert_eq!(OutputType::from_tag(""), OutputType::Console);
        assert_eq!(OutputType::from_tag("QUEUE"), OutputType::Queue);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for output in OutputType::ALL {
            assert_eq!(output.to_string().parse::<OutputType>(), Ok(output));
        }
    }
}
