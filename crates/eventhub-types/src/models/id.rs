use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a server-owned resource.
///
/// The backend may send ids as JSON numbers or strings. The original form is
/// kept so that ids echoed back in request bodies round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric primary key
    Number(i64),
    /// String key (UUID, ObjectId, ...)
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(trimmed.parse::<i64>().map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number))
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_ids_decode() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"[7, "a1b2"]"#).unwrap();
        assert_eq!(ids, vec![ResourceId::Number(7), ResourceId::Text("a1b2".to_string())]);
        assert_eq!(ids[0].to_string(), "7");
        assert_eq!(ids[1].to_string(), "a1b2");
    }

    #[test]
    fn test_parse_prefers_number() {
        assert_eq!("42".parse::<ResourceId>().unwrap(), ResourceId::Number(42));
        assert_eq!(" 42 ".parse::<ResourceId>().unwrap(), ResourceId::Number(42));
        assert_eq!("65f0c3".parse::<ResourceId>().unwrap(), ResourceId::from("65f0c3"));
    }

    #[test]
    fn test_numeric_id_serializes_as_number() {
        let json = serde_json::to_string(&ResourceId::Number(3)).unwrap();
        assert_eq!(json, "3");
    }
}
