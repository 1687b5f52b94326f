//! 서버 렌더링 페이지 빌더
//!
//! 라우트가 반환하는 최소한의 HTML 페이지들을 문자열로 조립합니다.
//! 템플릿 엔진 없이 고정된 레이아웃에 본문만 끼워 넣는 방식이며,
//! 사용자가 제출한 문자열은 삽입 전에 반드시 이스케이프됩니다.

use crate::domain::entities::users::user::User;
use crate::utils::string_utils::escape_html;

/// 공통 레이아웃으로 감싼 HTML 문서 생성
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body,
    )
}

/// 랜딩 페이지
pub fn home_page() -> String {
    page(
        "Secrets",
        concat!(
            "<h1>Secrets</h1>\n",
            "<p>당신의 시크릿을 익명으로 공유하세요.</p>\n",
            "<p><a href=\"/register\">회원가입</a> | <a href=\"/login\">로그인</a> | <a href=\"/secrets\">시크릿 보기</a></p>\n",
        ),
    )
}

/// 회원가입 폼 페이지
pub fn register_page() -> String {
    page(
        "회원가입",
        concat!(
            "<h1>회원가입</h1>\n",
            "<form action=\"/register\" method=\"post\">\n",
            "<label>사용자명 <input type=\"text\" name=\"username\"></label>\n",
            "<label>비밀번호 <input type=\"password\" name=\"password\"></label>\n",
            "<button type=\"submit\">가입</button>\n",
            "</form>\n",
            "<p><a href=\"/auth/google\">Google로 가입</a> | <a href=\"/auth/facebook\">Facebook으로 가입</a></p>\n",
        ),
    )
}

/// 로그인 폼 페이지
pub fn login_page() -> String {
    page(
        "로그인",
        concat!(
            "<h1>로그인</h1>\n",
            "<form action=\"/login\" method=\"post\">\n",
            "<label>사용자명 <input type=\"text\" name=\"username\"></label>\n",
            "<label>비밀번호 <input type=\"password\" name=\"password\"></label>\n",
            "<button type=\"submit\">로그인</button>\n",
            "</form>\n",
            "<p><a href=\"/auth/google\">Google로 로그인</a> | <a href=\"/auth/facebook\">Facebook으로 로그인</a></p>\n",
        ),
    )
}

/// 시크릿 제출 폼 페이지
pub fn submit_page() -> String {
    page(
        "시크릿 제출",
        concat!(
            "<h1>시크릿 제출</h1>\n",
            "<form action=\"/submit\" method=\"post\">\n",
            "<label>시크릿 <input type=\"text\" name=\"secret\"></label>\n",
            "<button type=\"submit\">제출</button>\n",
            "</form>\n",
            "<p><a href=\"/secrets\">시크릿 보기</a> | <a href=\"/logout\">로그아웃</a></p>\n",
        ),
    )
}

/// 공개 시크릿 목록 페이지
///
/// 시크릿을 제출한 모든 사용자의 항목을 제출 순서대로 나열합니다.
/// 사용자명과 시크릿 본문 모두 사용자 입력이므로 이스케이프를 거칩니다.
pub fn secrets_page(users: &[User]) -> String {
    let mut body = String::from("<h1>모두의 시크릿</h1>\n");

    if users.is_empty() {
        body.push_str("<p>아직 제출된 시크릿이 없습니다.</p>\n");
    } else {
        for user in users {
            body.push_str(&format!("<section>\n<h2>{}</h2>\n<ul>\n", escape_html(user.display_name())));
            for secret in &user.secrets {
                body.push_str(&format!("<li>{}</li>\n", escape_html(secret)));
            }
            body.push_str("</ul>\n</section>\n");
        }
    }

    body.push_str("<p><a href=\"/submit\">시크릿 제출</a> | <a href=\"/\">홈</a></p>\n");

    page("모두의 시크릿", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    #[test]
    fn test_secrets_page_escapes_user_content() {
        let mut user = User::new_local("<b>evil</b>".to_string(), "hash".to_string());
        user.secrets.push("<script>alert(1)</script>".to_string());

        let html = secrets_page(&[user]);

        assert!(html.contains("&lt;b&gt;evil&lt;/b&gt;"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_secrets_page_preserves_submission_order() {
        let mut user = User::new_local("bob".to_string(), "hash".to_string());
        user.secrets.push("S1".to_string());
        user.secrets.push("S2".to_string());

        let html = secrets_page(&[user]);

        let s1_pos = html.find("<li>S1</li>").unwrap();
        let s2_pos = html.find("<li>S2</li>").unwrap();
        assert!(s1_pos < s2_pos);
    }

    #[test]
    fn test_secrets_page_anonymous_author_for_oauth_user() {
        let mut user = User::new_oauth(AuthProvider::Google, "g-1".to_string());
        user.secrets.push("비밀".to_string());

        let html = secrets_page(&[user]);

        assert!(html.contains("<h2>익명</h2>"));
    }

    #[test]
    fn test_secrets_page_empty_state() {
        let html = secrets_page(&[]);

        assert!(html.contains("아직 제출된 시크릿이 없습니다"));
    }

    #[test]
    fn test_form_pages_post_to_expected_routes() {
        assert!(register_page().contains("action=\"/register\""));
        assert!(login_page().contains("action=\"/login\""));
        assert!(submit_page().contains("action=\"/submit\""));
    }
}
