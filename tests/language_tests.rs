//! Language resolution from the cookie

use hutir::application::language::{LanguageService, LANGUAGE_COOKIE_NAME};

fn service() -> LanguageService {
    LanguageService::new(vec!["ua".to_string(), "en".to_string()], "ua")
}

#[test]
fn test_current_language_from_cookie() {
    let languages = service();

    assert_eq!(languages.current_language(None), "ua");
    assert_eq!(languages.current_language(Some("en")), "en");
    assert_eq!(languages.current_language(Some("uk")), "ua");
    assert_eq!(languages.current_language(Some("en-US")), "en");
    assert_eq!(languages.current_language(Some("de")), "ua");
    assert_eq!(languages.current_language(Some("")), "ua");
}

#[test]
fn test_language_cookie_attributes() {
    let cookie = service().language_cookie("en");

    assert_eq!(cookie.name, LANGUAGE_COOKIE_NAME);
    assert_eq!(cookie.value, "en");
    assert_eq!(cookie.path, "/");
    assert_eq!(cookie.max_age_secs, 365 * 24 * 60 * 60);
    assert!(!cookie.http_only);
    assert_eq!(
        cookie.to_string(),
        "Language=en; Path=/; Max-Age=31536000; SameSite=Lax"
    );
}

#[test]
fn test_unsupported_language_cookie_uses_default() {
    let cookie = service().language_cookie("fr");
    assert_eq!(cookie.value, "ua");
}

#[test]
fn test_supported_languages_are_normalized() {
    let languages = LanguageService::new(vec!["UK".to_string(), "en-US".to_string()], "uk");

    assert_eq!(languages.supported_languages(), ["ua", "en"]);
    assert_eq!(languages.default_language(), "ua");
    assert!(languages.is_supported("ua"));
    assert!(!languages.is_supported("de"));
}
