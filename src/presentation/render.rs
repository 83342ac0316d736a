// Text rendering for CLI output
use crate::domain::model::{Contacts, LocalizationView, LocalizedString, Product, ResourceCategory};
use crate::presentation::theme::Theme;
use std::fmt::Write;

pub fn format_strings(strings: &[LocalizedString], theme: &Theme) -> String {
    let mut output = String::new();
    let width = strings.iter().map(|s| s.key.len()).max().unwrap_or(0);
    for s in strings {
        let padded = format!("{:width$}", s.key, width = width);
        writeln!(output, "{}  {}", (theme.key)(&padded), (theme.value)(&s.value)).ok();
    }
    output
}

pub fn format_view(view: &LocalizationView, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "{} [{}]",
        (theme.title)(&view.current_language),
        view.available_languages.join(", ")
    )
    .ok();
    writeln!(output, "{}", (theme.line)(&"⸺".repeat(40))).ok();
    for category in &view.categories {
        write_category(&mut output, category, 1, theme);
    }
    output
}

fn write_category(output: &mut String, category: &ResourceCategory, depth: usize, theme: &Theme) {
    let indent = "  ".repeat(depth);
    if category.categories.is_empty() && !category.resources.is_empty() {
        for entry in &category.resources {
            writeln!(
                output,
                "{}{} = {}",
                indent,
                (theme.key)(&entry.full_key()),
                (theme.value)(&entry.value)
            )
            .ok();
        }
        return;
    }
    writeln!(output, "{}{}", indent, (theme.title)(&category.full_path())).ok();
    for child in &category.categories {
        write_category(output, child, depth + 1, theme);
    }
}

pub fn format_products(products: &[Product], language: &str, theme: &Theme) -> String {
    let mut output = String::new();
    if products.is_empty() {
        writeln!(output, "{}", (theme.muted)("No products")).ok();
        return output;
    }
    for product in products {
        let status = if product.is_active {
            (theme.ok)("active")
        } else {
            (theme.warn)("inactive")
        };
        writeln!(
            output,
            "{} {} ({}) #{} {}",
            (theme.muted)(&product.id),
            (theme.title)(product.display_name(language)),
            product.category,
            product.sort_order,
            status
        )
        .ok();
        let description = product.display_description(language);
        if !description.is_empty() {
            writeln!(output, "    {}", (theme.value)(description)).ok();
        }
    }
    output
}

pub fn format_contacts(contacts: &Contacts, theme: &Theme) -> String {
    let mut output = String::new();
    let rows = [
        ("Email", Some(contacts.email.as_str())),
        ("Phone", Some(contacts.phone.as_str())),
        ("Facebook", contacts.facebook_url.as_deref()),
        ("Instagram", contacts.instagram_url.as_deref()),
        ("WhatsApp", contacts.whatsapp_url.as_deref()),
    ];
    for (label, value) in rows {
        writeln!(
            output,
            "{:10} {}",
            (theme.key)(label),
            (theme.value)(value.unwrap_or("-"))
        )
        .ok();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_aligned_on_key_width() {
        let strings = vec![
            LocalizedString::new("a", "1"),
            LocalizedString::new("site.title", "Hutir"),
        ];
        let out = format_strings(&strings, &Theme::new(true));
        assert_eq!(out, format!("{:10}  1\n{}  Hutir\n", "a", "site.title"));
    }

    #[test]
    fn contacts_show_placeholder_for_missing_links() {
        let contacts = Contacts {
            email: "a@b.c".into(),
            phone: "1".into(),
            ..Default::default()
        };
        let out = format_contacts(&contacts, &Theme::new(true));
        assert!(out.contains("a@b.c"));
        assert!(out.lines().any(|l| l.starts_with("Facebook") && l.ends_with('-')));
    }
}
