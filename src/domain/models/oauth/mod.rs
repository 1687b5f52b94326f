//! OAuth 프로바이더 통합 모델
//!
//! 외부 인증 프로바이더(Google, Facebook)의 API 응답을 매핑하는
//! 와이어 모델들을 정의합니다. 각 프로바이더의 어댑터 서비스가
//! 토큰 교환과 프로필 조회에 사용합니다.

pub mod google;
pub mod facebook;

pub use google::{GoogleTokenResponse, GoogleUserInfo};
pub use facebook::{FacebookTokenResponse, FacebookUserInfo};
