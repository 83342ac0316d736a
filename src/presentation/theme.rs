use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub key: fn(&str) -> String,
    pub value: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub ok: fn(&str) -> String,
    pub warn: fn(&str) -> String,
    pub muted: fn(&str) -> String,
}

impl Theme {
    /// Colored output, or plain text when `plain` is set (JSON mode, tests).
    pub fn new(plain: bool) -> Self {
        if plain {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    fn colored() -> Self {
        Self {
            title: |s| s.bright_magenta().bold().underline().to_string(),
            key: |s| s.cyan().to_string(),
            value: |s| s.white().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            ok: |s| s.green().to_string(),
            warn: |s| s.yellow().to_string(),
            muted: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn plain() -> Self {
        Self {
            title: |s| s.to_string(),
            key: |s| s.to_string(),
            value: |s| s.to_string(),
            line: |s| s.to_string(),
            ok: |s| s.to_string(),
            warn: |s| s.to_string(),
            muted: |s| s.to_string(),
        }
    }
}
