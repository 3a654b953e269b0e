//! 요청 본문 화이트리스트 필터

use serde_json::{Map, Value};

/// 허용된 키만 남긴 새 맵을 돌려줍니다.
///
/// 값은 변경하지 않으며, 허용되지 않은 키는 조용히 버려집니다.
/// 결과가 비어 있을 수 있으므로 호출자가 직접 확인해야 합니다.
pub fn filter_obj<S: AsRef<str>>(allowed: &[S], input: &Map<String, Value>) -> Map<String, Value> {
    input
        .iter()
        .filter(|(key, _)| allowed.iter().any(|a| a.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
