use crate::application::localizer::Localizer;

/// Warm the cache with every language's strings before serving. Returns the
/// number of strings loaded; missing documents are skipped with a warning.
pub async fn preload(localizer: &Localizer, languages: &[String]) -> usize {
    tracing::info!("Preloading localization resources...");
    let available = localizer.store().available_languages().await;
    let mut total = 0;

    for language in languages {
        if !available.contains(language) {
            tracing::warn!("Resource file not found for language: {}", language);
            continue;
        }
        let strings = localizer.get_all_strings(language).await;
        tracing::info!("Cached {} strings for language {}", strings.len(), language);
        total += strings.len();
    }

    tracing::info!("Localization resources preloaded ({} strings)", total);
    total
}
