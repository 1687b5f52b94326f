//! 세션 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 세션 쿠키를 검증하고 사용자 정보를 복원합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 세션 인증 미들웨어
///
/// 요청 파이프라인의 시작 시점에 세션 쿠키에서 사용자를 복원하는
/// 세션 복원 단계입니다. 두 가지 모드를 지원합니다:
///
/// - **Optional**: 전역으로 적용. 세션이 유효하면 복원하고 아니면 익명으로 진행
/// - **Required**: 보호된 스코프에 적용. 익명 요청은 로그인 페이지로 리다이렉트
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 필수 인증 미들웨어 생성
    ///
    /// 익명 요청은 `302 /login`으로 리다이렉트됩니다.
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AuthProvider;
    use crate::domain::models::auth::AuthenticatedUser;
    use super::*;

    #[test]
    fn test_auth_mode_constructors() {
        let required = AuthMiddleware::required();
        let optional = AuthMiddleware::optional();

        assert_eq!(required.mode, AuthMode::Required);
        assert_eq!(optional.mode, AuthMode::Optional);
    }

    #[test]
    fn test_authenticated_user_context() {
        let user = AuthenticatedUser {
            user_id: "507f1f77bcf86cd799439011".to_string(),
            auth_provider: AuthProvider::Google,
        };

        assert_eq!(user.user_id, "507f1f77bcf86cd799439011");
        assert_eq!(user.auth_provider, AuthProvider::Google);
    }
}
