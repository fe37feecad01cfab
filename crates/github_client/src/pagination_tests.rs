use super::*;
use http::HeaderValue;

#[test]
fn test_cursor_starts_at_first_page_with_max_size() {
    let cursor = PageCursor::first();

    assert_eq!(cursor.page, 1);
    assert_eq!(cursor.per_page, 100);
    assert_eq!(cursor, PageCursor::default());
}

#[test]
fn test_cursor_apply_to_path() {
    let mut cursor = PageCursor::first();
    assert_eq!(
        cursor.apply_to("/users/octocat/followers"),
        "/users/octocat/followers?page=1&per_page=100"
    );

    cursor.advance();
    assert_eq!(
        cursor.apply_to("/search?q=x"),
        "/search?q=x&page=2&per_page=100"
    );
}

#[test]
fn test_login_case() {
    assert_eq!(LoginCase::Lowercase.apply("Alice"), "alice");
    assert_eq!(LoginCase::Preserve.apply("Alice"), "Alice");
    assert_eq!(LoginCase::default(), LoginCase::Lowercase);
}

#[test]
fn test_parse_link_header_github_style() {
    let value = r#"<https://api.github.com/user/1/followers?page=2>; rel="next", <https://api.github.com/user/1/followers?page=5>; rel="last""#;

    let links = parse_link_header(value);

    assert_eq!(links.len(), 2);
    assert_eq!(
        links[0].url,
        "https://api.github.com/user/1/followers?page=2"
    );
    assert!(links[0].has_rel("next"));
    assert!(links[1].has_rel("last"));
    assert!(!links[1].has_rel("next"));
}

#[test]
fn test_parse_link_header_multiple_and_unquoted_rels() {
    let links = parse_link_header("<https://a/?page=1>; rel=first, <https://a/?page=3>; rel=\"NEXT last\"");

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].rels, vec!["first".to_string()]);
    assert_eq!(links[1].rels, vec!["next".to_string(), "last".to_string()]);
}

#[test]
fn test_parse_link_header_ignores_garbage() {
    assert!(parse_link_header("").is_empty());
    assert!(parse_link_header("rel=\"next\"").is_empty());
    assert!(parse_link_header("<https://unterminated; rel=\"next\"").is_empty());
}

#[test]
fn test_has_next_page() {
    let mut headers = HeaderMap::new();
    assert!(!has_next_page(&headers));

    headers.insert(
        LINK,
        HeaderValue::from_static(r#"<https://api.github.com/x?page=1>; rel="prev""#),
    );
    assert!(!has_next_page(&headers));

    headers.append(
        LINK,
        HeaderValue::from_static(r#"<https://api.github.com/x?page=3>; rel="next""#),
    );
    assert!(has_next_page(&headers));
}

#[test]
fn test_next_substring_in_url_is_not_a_relation() {
    let mut headers = HeaderMap::new();
    headers.insert(
        LINK,
        HeaderValue::from_static(r#"<https://api.github.com/next?page=1>; rel="prev""#),
    );

    assert!(!has_next_page(&headers));
}
