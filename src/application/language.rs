use crate::domain::language::normalize;
use std::fmt;

pub const LANGUAGE_COOKIE_NAME: &str = "Language";
const COOKIE_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;

/// Resolves the active language from the request's language cookie.
#[derive(Debug, Clone)]
pub struct LanguageService {
    supported: Vec<String>,
    default_language: String,
}

impl LanguageService {
    pub fn new(supported: Vec<String>, default_language: impl Into<String>) -> Self {
        Self {
            supported: supported.iter().map(|l| normalize(l)).collect(),
            default_language: normalize(&default_language.into()),
        }
    }

    pub fn supported_languages(&self) -> &[String] {
        &self.supported
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn is_supported(&self, code: &str) -> bool {
        let code = normalize(code);
        self.supported.iter().any(|l| *l == code)
    }

    /// Language for a request given its cookie value. Absent or unsupported
    /// values resolve to the default language.
    pub fn current_language(&self, cookie: Option<&str>) -> String {
        match cookie.map(normalize) {
            Some(code) if self.supported.contains(&code) => code,
            _ => self.default_language.clone(),
        }
    }

    /// Cookie to set on a language-change action.
    pub fn language_cookie(&self, requested: &str) -> LanguageCookie {
        let value = if self.is_supported(requested) {
            normalize(requested)
        } else {
            tracing::warn!("Unsupported language requested: {}", requested);
            self.default_language.clone()
        };
        tracing::info!("Language set to: {}", value);
        LanguageCookie {
            name: LANGUAGE_COOKIE_NAME,
            value,
            path: "/",
            max_age_secs: COOKIE_MAX_AGE_SECS,
            same_site: "Lax",
            http_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCookie {
    pub name: &'static str,
    pub value: String,
    pub path: &'static str,
    pub max_age_secs: i64,
    pub same_site: &'static str,
    pub http_only: bool,
}

// Set-Cookie header value
impl fmt::Display for LanguageCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path={}; Max-Age={}; SameSite={}",
            self.name, self.value, self.path, self.max_age_secs, self.same_site
        )?;
        if self.http_only {
            write!(f, "; HttpOnly")?;
        }
        Ok(())
    }
}
