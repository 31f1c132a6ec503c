use super::*;

#[test]
fn bearer_header_prefixes_token() {
    assert_eq!(bearer_header("tok123"), "Bearer tok123");
}

#[test]
fn book_path_formats_expected_path() {
    assert_eq!(book_path(42), "/books/42");
}

// =============================================================
// error_detail
// =============================================================

#[test]
fn error_detail_prefers_json_detail() {
    assert_eq!(
        error_detail(r#"{"detail":"Incorrect username or password"}"#, "Unauthorized"),
        "Incorrect username or password"
    );
}

#[test]
fn error_detail_stringifies_structured_detail() {
    let msg = error_detail(r#"{"detail":[{"loc":["body","title"],"msg":"field required"}]}"#, "Unprocessable Entity");
    assert!(msg.contains("field required"));
}

#[test]
fn error_detail_falls_back_to_raw_body() {
    assert_eq!(error_detail("upstream exploded", "Bad Gateway"), "upstream exploded");
    assert_eq!(error_detail(r#"{"error":"nope"}"#, "Bad Request"), r#"{"error":"nope"}"#);
}

#[test]
fn error_detail_falls_back_to_status_text_when_body_empty() {
    assert_eq!(error_detail("", "Not Found"), "Not Found");
    assert_eq!(error_detail("  \n", "Not Found"), "Not Found");
}

#[test]
fn status_error_display_matches_http_prefix() {
    let err = ApiError::Status { status: 409, message: "Username already registered".to_owned() };
    assert_eq!(err.to_string(), "HTTP 409: Username already registered");
}

// =============================================================
// body_text
// =============================================================

#[test]
fn body_text_passes_through_read_body() {
    assert_eq!(body_text::<String>(Ok("{}".to_owned())).unwrap(), "{}");
}

#[test]
fn body_text_read_failure_is_network_error() {
    let err = body_text(Err("stream interrupted")).unwrap_err();
    assert!(matches!(err, ApiError::Network(ref msg) if msg == "stream interrupted"));
}

// =============================================================
// decode_body
// =============================================================

#[test]
fn decode_body_parses_user() {
    let user: User = decode_body(r#"{"id":7,"username":"ana","email":"a@x.com"}"#).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.email.as_deref(), Some("a@x.com"));
}

#[test]
fn decode_body_reports_malformed_json() {
    let err = decode_body::<User>("<html>").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_body_reports_empty_body() {
    assert!(matches!(decode_body::<Vec<Book>>(""), Err(ApiError::Decode(_))));
}

// =============================================================
// Non-browser stubs
// =============================================================

#[cfg(not(feature = "hydrate"))]
mod unavailable {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn fetch_profile_is_unavailable_off_browser() {
        let cfg = ApiConfig::new("http://localhost:8000");
        assert!(matches!(block_on(fetch_profile(&cfg, "tok")), Err(ApiError::Unavailable)));
    }

    #[test]
    fn book_calls_are_unavailable_off_browser() {
        let cfg = ApiConfig::new("http://localhost:8000");
        assert!(matches!(block_on(list_books(&cfg, Some("tok"))), Err(ApiError::Unavailable)));
        assert!(matches!(block_on(delete_book(&cfg, None, 1)), Err(ApiError::Unavailable)));
    }

    #[test]
    fn login_is_unavailable_off_browser() {
        let cfg = ApiConfig::new("http://localhost:8000");
        let creds = Credentials { username: "ana".to_owned(), password: "pw".to_owned() };
        assert!(matches!(block_on(login_user(&cfg, &creds)), Err(ApiError::Unavailable)));
    }
}
