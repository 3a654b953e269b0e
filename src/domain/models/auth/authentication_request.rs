use crate::domain::entities::users::user::Role;

/// 역할 요구사항
///
/// `RestrictTo` 미들웨어가 요청 주체의 역할을 검사할 때 사용합니다.
#[derive(Debug, Clone)]
pub enum RequiredRole {
    /// 단일 역할 필요
    Single(Role),
    /// 여러 역할 중 하나 필요
    Any(Vec<Role>),
}

impl RequiredRole {
    pub fn from_roles(roles: &[Role]) -> Self {
        match roles {
            [role] => RequiredRole::Single(*role),
            _ => RequiredRole::Any(roles.to_vec()),
        }
    }

    /// 역할 요구사항 충족 여부
    ///
    /// 역할이 로드되지 않은 주체(`None`)는 어떤 요구사항도 충족하지 못합니다.
    pub fn is_satisfied(&self, role: Option<Role>) -> bool {
        let Some(role) = role else {
            return false;
        };

        match self {
            RequiredRole::Single(required) => *required == role,
            RequiredRole::Any(required) => required.contains(&role),
        }
    }
}
