// Main entry point
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use hutir::application::{backup, preload};
use hutir::domain::model::{Contacts, Product};
use hutir::infrastructure::config::{self, load_config, Config};
use hutir::interfaces::cli::{
    BackupAction, Cli, Command, ContactsAction, LanguageAction, ProductAction, ProductFields,
};
use hutir::presentation::render;
use hutir::presentation::theme::Theme;
use hutir::AppState;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::GenerateConfig) {
        config::generate_config_sample()?;
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config.content_root = root.to_string_lossy().into_owned();
    }
    if cli.nocache {
        config.cache.enabled = false;
    }

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let state = AppState::init(config)
        .await
        .context("Failed to prepare the persistent directory")?;

    // Warm the cache the way the site does before taking traffic
    if state.cache.is_some() && !matches!(cli.command, Command::Preload) {
        preload::preload(&state.localizer, state.languages.supported_languages()).await;
    }

    tokio::select! {
        result = run(&state, &cli) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted");
            Ok(())
        }
    }
}

async fn run(state: &AppState, cli: &Cli) -> anyhow::Result<()> {
    let theme = Theme::new(cli.json);

    match &cli.command {
        Command::Get { key, language } => {
            let language = state.languages.current_language(language.as_deref());
            let value = state.localizer.get_string(&language, key).await;
            emit(cli.json, &value, || format!("{}\n", value))?;
        }
        Command::Format {
            key,
            args,
            language,
        } => {
            let language = state.languages.current_language(language.as_deref());
            let value = state.localizer.get_formatted(&language, key, args).await;
            emit(cli.json, &value, || format!("{}\n", value))?;
        }
        Command::List { language } => {
            let language = state.languages.current_language(language.as_deref());
            let strings = state.localizer.get_all_strings(&language).await;
            emit(cli.json, strings.as_ref(), || {
                render::format_strings(&strings, &theme)
            })?;
        }
        Command::Set {
            language,
            key,
            value,
        } => {
            if state.editor.update_resource(language, key, value).await {
                println!("{}", (theme.ok)("Text updated"));
            } else {
                eprintln!("{}", "Failed to update text".red());
                std::process::exit(1);
            }
        }
        Command::Languages => {
            let languages = state.editor.available_languages().await;
            emit(cli.json, &languages, || format!("{}\n", languages.join("\n")))?;
        }
        Command::View { language } => {
            let requested = language
                .clone()
                .unwrap_or_else(|| state.languages.default_language().to_string());
            let view = state.editor.view(&requested).await;
            emit(cli.json, &view, || render::format_view(&view, &theme))?;
        }
        Command::Language { action } => match action {
            LanguageAction::Current { cookie } => {
                println!("{}", state.languages.current_language(cookie.as_deref()));
            }
            LanguageAction::Set { code } => {
                println!("{}", state.languages.language_cookie(code));
            }
        },
        Command::Preload => {
            let total =
                preload::preload(&state.localizer, state.languages.supported_languages()).await;
            println!("Preloaded {} strings", total);
        }
        Command::Products { action } => run_products(state, cli, &theme, action).await?,
        Command::Contacts { action } => run_contacts(state, cli, &theme, action).await?,
        Command::Backup { action } => match action {
            BackupAction::Export { archive } => {
                let count = backup::export_backup(state, archive).await?;
                println!("Exported {} files to {}", count, archive.display());
            }
            BackupAction::Import { archive } => {
                let count = backup::import_backup(state, archive).await?;
                println!("Imported {} files from {}", count, archive.display());
            }
        },
        Command::Status => print_status(state).await,
        Command::GenerateConfig => config::generate_config_sample()?,
    }

    Ok(())
}

async fn run_products(
    state: &AppState,
    cli: &Cli,
    theme: &Theme,
    action: &ProductAction,
) -> anyhow::Result<()> {
    let default_language = state.languages.default_language().to_string();
    match action {
        ProductAction::List => {
            let products = state.products.all().await;
            emit(cli.json, &products, || {
                render::format_products(&products, &default_language, theme)
            })?;
        }
        ProductAction::Active { language } => {
            let language = state.languages.current_language(language.as_deref());
            let products = state.products.active().await;
            emit(cli.json, &products, || {
                render::format_products(&products, &language, theme)
            })?;
        }
        ProductAction::Show { id } => match state.products.by_id(id).await {
            Some(product) => emit(cli.json, &product, || {
                render::format_products(std::slice::from_ref(&product), &default_language, theme)
            })?,
            None => not_found(id),
        },
        ProductAction::Add(fields) => {
            let mut product = Product::new("", "", "");
            apply_fields(&mut product, fields);
            if product.name.is_empty() || product.name_en.is_empty() || product.category.is_empty()
            {
                anyhow::bail!("--name, --name-en and --category are required");
            }
            let id = product.id.clone();
            report(state.products.add(product).await, &format!("Product {} created", id), theme);
        }
        ProductAction::Update { id, fields } => {
            let Some(mut product) = state.products.by_id(id).await else {
                not_found(id);
            };
            apply_fields(&mut product, fields);
            report(state.products.update(product).await, "Product updated", theme);
        }
        ProductAction::Delete { id } => {
            report(state.products.delete(id).await, "Product deleted", theme);
        }
        ProductAction::Toggle { id } => match state.products.toggle(id).await {
            Some(true) => println!("{}", (theme.ok)("Product activated")),
            Some(false) => println!("{}", (theme.ok)("Product deactivated")),
            None => not_found(id),
        },
    }
    Ok(())
}

async fn run_contacts(
    state: &AppState,
    cli: &Cli,
    theme: &Theme,
    action: &ContactsAction,
) -> anyhow::Result<()> {
    match action {
        ContactsAction::Show => {
            let contacts = state.contacts.get().await;
            emit(cli.json, &contacts, || render::format_contacts(&contacts, theme))?;
        }
        ContactsAction::Set {
            email,
            phone,
            facebook,
            instagram,
            whatsapp,
        } => {
            let current = state.contacts.get().await;
            let updated = Contacts {
                email: email.clone().unwrap_or(current.email),
                phone: phone.clone().unwrap_or(current.phone),
                facebook_url: facebook.clone().or(current.facebook_url),
                instagram_url: instagram.clone().or(current.instagram_url),
                whatsapp_url: whatsapp.clone().or(current.whatsapp_url),
            };
            report(
                state.contacts.update(&updated).await,
                "Contact information updated",
                theme,
            );
        }
    }
    Ok(())
}

fn apply_fields(product: &mut Product, fields: &ProductFields) {
    if let Some(v) = &fields.name {
        product.name = v.clone();
    }
    if let Some(v) = &fields.name_en {
        product.name_en = v.clone();
    }
    if let Some(v) = &fields.category {
        product.category = v.clone();
    }
    if let Some(v) = &fields.description {
        product.description = v.clone();
    }
    if let Some(v) = &fields.description_en {
        product.description_en = v.clone();
    }
    if let Some(v) = &fields.image {
        product.image_path = v.clone();
    }
    if let Some(v) = fields.sort_order {
        product.sort_order = v;
    }
    if let Some(v) = fields.active {
        product.is_active = v;
    }
}

/// Print `value` as JSON, or the text produced by `text`.
fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn report(success: bool, message: &str, theme: &Theme) {
    if success {
        println!("{}", (theme.ok)(message));
    } else {
        eprintln!("{}", "Operation failed, see log for details".red());
        std::process::exit(1);
    }
}

fn not_found(id: &str) -> ! {
    eprintln!("{}", format!("Product not found: {}", id).red());
    std::process::exit(1);
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn print_status(state: &AppState) {
    let config: &Config = &state.config;
    println!("{}", "Hutir Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("Persistent: {}", config.persistent_root().display());
    println!("Resources: {}", state.store.root().display());
    println!(
        "Languages: {} (default {})",
        state.editor.available_languages().await.join(", "),
        state.languages.default_language()
    );
    println!("Products: {}", state.products.all().await.len());

    match &state.cache {
        Some(cache) => {
            let purged = cache.purge_expired();
            println!(
                "Memory Cache: {} entries, version {} ({} expired purged)",
                cache.len(),
                cache.version(),
                purged
            );
        }
        None => println!("Memory Cache: disabled"),
    }

    println!(
        "Config: {}",
        config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
}
