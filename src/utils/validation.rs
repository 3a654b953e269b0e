//! # 스키마 검증기
//!
//! 필드 이름과 기대하는 원시 타입을 선언적으로 기술한 [`Schema`]로
//! 요청 본문을 검증합니다. 실패 시 위반된 필드마다
//! `"<필드>: <사유>"` 형식의 메시지를 하나씩 만들어
//! [`AppError::ValidationError`]로 한꺼번에 돌려줍니다.
//!
//! 화이트리스트 적용은 검증기의 책임이 아닙니다. 스키마에 없는 키는
//! 호출 지점에서 [`filter_obj`](crate::utils::filter::filter_obj)로 미리 제거합니다.
//!
//! ```rust,ignore
//! let schema = Schema::new()
//!     .field("username", FieldType::String)
//!     .field("email", FieldType::String)
//!     .rule(Rule::Email);
//!
//! schema.validate(&body, false)?;        // 생성: 모든 필드 필수
//! schema.validate(&patch, true)?;        // 수정: 모든 필드 선택
//! ```

use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::core::errors::{AppError, AppResult};

/// 스키마가 허용하는 원시 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldType::String, Value::String(_))
                | (FieldType::Number, Value::Number(_))
                | (FieldType::Boolean, Value::Bool(_))
        )
    }
}

/// 타입 검사 이후 적용되는 추가 규칙
#[derive(Debug, Clone)]
pub enum Rule {
    /// 문자열이 이메일 형식이어야 함
    Email,
    /// 문자열 최소 길이 (문자 수)
    MinLength(usize),
    /// 허용된 값 중 하나여야 함
    OneOf(&'static [&'static str]),
}

impl Rule {
    fn check(&self, value: &Value) -> Option<String> {
        let text = value.as_str()?;

        match self {
            Rule::Email if !text.validate_email() => Some("Invalid email".to_string()),
            Rule::MinLength(min) if text.chars().count() < *min => {
                Some(format!("Must be at least {} characters", min))
            }
            Rule::OneOf(options) if !options.contains(&text) => {
                Some(format!("Must be one of {}", options.join(", ")))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldDef {
    name: &'static str,
    kind: FieldType,
    rules: Vec<Rule>,
}

/// 선언적 검증 스키마
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드를 추가합니다.
    pub fn field(mut self, name: &'static str, kind: FieldType) -> Self {
        self.fields.push(FieldDef {
            name,
            kind,
            rules: Vec::new(),
        });
        self
    }

    /// 마지막으로 추가한 필드에 규칙을 붙입니다.
    pub fn rule(mut self, rule: Rule) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.rules.push(rule);
        }
        self
    }

    /// 스키마가 선언한 키 목록 (선언 순서 유지)
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.kind)
    }

    /// 데이터를 검증합니다.
    ///
    /// `partial`이 참이면 모든 필드가 선택 항목이 됩니다. 존재하는 필드는
    /// 어느 모드에서든 타입과 규칙을 검사합니다.
    pub fn validate(&self, data: &Map<String, Value>, partial: bool) -> AppResult<()> {
        let mut messages = Vec::new();

        for field in &self.fields {
            match data.get(field.name) {
                None if partial => {}
                None => messages.push(format!("{}: Required", field.name)),
                Some(value) if !field.kind.matches(value) => messages.push(format!(
                    "{}: Expected {}, received {}",
                    field.name,
                    field.kind.name(),
                    received_type(value)
                )),
                Some(value) => {
                    if let Some(reason) = field.rules.iter().find_map(|rule| rule.check(value)) {
                        messages.push(format!("{}: {}", field.name, reason));
                    }
                }
            }
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(messages))
        }
    }
}

fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
