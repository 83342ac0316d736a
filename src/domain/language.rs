// Language code handling shared by the store and the services

pub const DEFAULT_LANGUAGE: &str = "ua";
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["ua", "en"];

/// Lowercase, strip any region suffix (`en-US` -> `en`) and map the ISO
/// code for Ukrainian onto the site's canonical `ua`.
pub fn normalize(code: &str) -> String {
    let lower = code.trim().to_lowercase();
    let base = lower.split(['-', '_']).next().unwrap_or_default();
    match base {
        "uk" => "ua".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_region_and_maps_legacy_code() {
        assert_eq!(normalize("en-US"), "en");
        assert_eq!(normalize("EN"), "en");
        assert_eq!(normalize("uk"), "ua");
        assert_eq!(normalize("uk-UA"), "ua");
        assert_eq!(normalize("ua"), "ua");
        assert_eq!(normalize(" pt_BR "), "pt");
        assert_eq!(normalize(""), "");
    }
}
