//! # 문자열 유틸리티
//!
//! 동적 JSON 요청 본문에서 문자열 필드를 꺼내고 정리하는 함수들입니다.

use serde_json::{Map, Value};

/// 본문에서 문자열 필드를 꺼냅니다.
///
/// 키가 없거나 값이 문자열이 아니면 `None`입니다.
///
/// ```rust,ignore
/// let email = body_str(&body, "email").ok_or_else(|| AppError::BadRequest(..))?;
/// ```
pub fn body_str<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

/// 본문 필드를 꺼내 앞뒤 공백을 제거합니다.
///
/// 공백만 있는 값은 빈 문자열이 되므로 호출자가 빈 값 여부를 따로 판단할 수 있습니다.
pub fn trimmed_field(body: &Map<String, Value>, key: &str) -> Option<String> {
    body_str(body, key).map(|value| value.trim().to_string())
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 선택적 문자열 정리
///
/// 값이 없거나 공백뿐이면 `None`, 그 외에는 공백을 제거한 값을 돌려줍니다.
pub fn clean_optional_string(value: Option<&str>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Map<String, Value> {
        match json!({ "email": "  a@x.com ", "password": "   ", "age": 3 }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_body_str() {
        let body = body();

        assert_eq!(body_str(&body, "email"), Some("  a@x.com "));
        assert_eq!(body_str(&body, "age"), None);
        assert_eq!(body_str(&body, "missing"), None);
    }

    #[test]
    fn test_trimmed_field() {
        let body = body();

        assert_eq!(trimmed_field(&body, "email"), Some("a@x.com".to_string()));
        assert_eq!(trimmed_field(&body, "password"), Some(String::new()));
        assert_eq!(trimmed_field(&body, "missing"), None);
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("Hello"));
        assert!(is_valid_string("  World  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("\t\n"));
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  챌린지  ")), Some("챌린지".to_string()));
        assert_eq!(clean_optional_string(Some("   ")), None);
        assert_eq!(clean_optional_string(None), None);
    }
}
