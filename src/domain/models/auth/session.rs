//! 세션 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임을 사용하는 세션 토큰의 페이로드를 정의합니다.
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 세션 토큰의 클레임(Payload) 구조체
///
/// 세션 토큰에는 사용자의 id만 담깁니다. 요청마다 이 id로 저장소에서
/// 사용자를 다시 조회하므로, 삭제되거나 비활성화된 계정의 오래된
/// 세션은 자동으로 익명 상태로 격하됩니다.
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID, ObjectId 16진수 문자열)
/// - `auth_provider`: 인증 방식 (Local, Google, Facebook)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
