use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hutir")]
#[command(about = "Manage the Hutir site content: translations, products, contacts and backups.")]
#[command(version)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Content root holding the Persistent directory
    #[arg(short = 'r', long, global = true)]
    pub root: Option<PathBuf>,

    /// Bypass the memory cache
    #[arg(short = 'n', long, global = true)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up one translation
    Get {
        key: String,
        /// Language cookie value; unsupported values use the default language
        #[arg(short = 'l', long)]
        language: Option<String>,
    },

    /// Look up a translation and substitute {0}, {1}, ... with ARGS
    Format {
        key: String,
        args: Vec<String>,
        #[arg(short = 'l', long)]
        language: Option<String>,
    },

    /// List every translation of a language as dotted keys
    List {
        #[arg(short = 'l', long)]
        language: Option<String>,
    },

    /// Change one translation value
    Set {
        language: String,
        key: String,
        value: String,
    },

    /// Show languages whose resource file exists
    Languages,

    /// Show the editor tree of a language
    View { language: Option<String> },

    /// Resolve or change the active language
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },

    /// Warm the cache for every supported language
    Preload,

    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Show or edit contact information
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },

    /// Export or import the persisted data
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Show status
    Status,

    /// Generate config sample
    GenerateConfig,
}

#[derive(Subcommand)]
pub enum LanguageAction {
    /// Language a request with this cookie value would get
    Current { cookie: Option<String> },
    /// Print the Set-Cookie value for switching to CODE
    Set { code: String },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// All products
    List,
    /// Active products in display order
    Active {
        #[arg(short = 'l', long)]
        language: Option<String>,
    },
    Show { id: String },
    Add(ProductFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete { id: String },
    /// Flip a product between active and inactive
    Toggle { id: String },
}

#[derive(Args, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub name_en: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub description_en: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub sort_order: Option<i32>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand)]
pub enum ContactsAction {
    Show,
    Set {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write the Persistent tree to a zip archive
    Export { archive: PathBuf },
    /// Restore a zip archive containing Data/ and Resources/
    Import { archive: PathBuf },
}
