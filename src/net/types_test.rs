use super::*;

// =============================================================
// User
// =============================================================

#[test]
fn user_deserializes_profile_without_email() {
    let user: User = serde_json::from_str(r#"{"id":7,"username":"ana"}"#).unwrap();
    assert_eq!(user, User { id: 7, username: "ana".to_owned(), email: None });
}

#[test]
fn user_serialization_omits_missing_email() {
    let json = serde_json::to_value(User { id: 3, username: "bo".to_owned(), email: None }).unwrap();
    assert_eq!(json, serde_json::json!({ "id": 3, "username": "bo" }));
}

#[test]
fn user_rejects_wrong_shape() {
    assert!(serde_json::from_str::<User>(r#"{"id":"seven","username":"ana"}"#).is_err());
    assert!(serde_json::from_str::<User>(r#"{"id":7}"#).is_err());
    assert!(serde_json::from_str::<User>(r#"["ana"]"#).is_err());
}

#[test]
fn placeholder_user_has_no_identity() {
    let user = User::placeholder("ana");
    assert_eq!(user.id, 0);
    assert_eq!(user.username, "ana");
    assert!(!user.has_identity());
    assert!(User { id: 1, username: "x".to_owned(), email: None }.has_identity());
}

// =============================================================
// TokenResponse
// =============================================================

#[test]
fn token_response_parses_full_body() {
    let token: TokenResponse =
        serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer","expires_in":1800}"#).unwrap();
    assert_eq!(token.access_token, "abc");
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.expires_in, Some(1800));
}

#[test]
fn token_response_defaults_optional_fields() {
    let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.expires_in, None);
}

// =============================================================
// Books
// =============================================================

#[test]
fn book_accepts_nulls_and_missing_fields() {
    let book: Book = serde_json::from_str(
        r#"{"id":1,"title":"Dune","author":null,"cover_image_url":null,"is_recommended":true,"read_on":"2024-05-01"}"#,
    )
    .unwrap();
    assert_eq!(book.id, 1);
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, None);
    assert_eq!(book.review_text, None);
    assert_eq!(book.is_recommended, Some(true));
    assert_eq!(book.read_on.as_deref(), Some("2024-05-01"));
    assert_eq!(book.created_at, None);
}

#[test]
fn book_create_omits_unset_fields() {
    let body = BookCreate { title: "Dune".to_owned(), is_recommended: Some(false), ..BookCreate::default() };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "title": "Dune", "is_recommended": false }));
}

#[test]
fn book_update_serializes_only_changed_fields() {
    let body = BookUpdate { review_text: Some("Great".to_owned()), ..BookUpdate::default() };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "review_text": "Great" }));
}

#[test]
fn credentials_serialize_username_and_password() {
    let creds = Credentials { username: "ana".to_owned(), password: "pw".to_owned() };
    let json = serde_json::to_value(&creds).unwrap();
    assert_eq!(json, serde_json::json!({ "username": "ana", "password": "pw" }));
}
