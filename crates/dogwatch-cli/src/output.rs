use clap::ValueEnum;
use comfy_table::{Cell, Table};
use dogwatch_models::{WatchlistItem, WatchlistKind};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    /// Print the version. Like watchlist data, this ignores quiet mode.
    pub fn version(&self, version: &str) {
        println!("{}", self.render_version(version));
    }

    fn render_version(&self, version: &str) -> String {
        match self.format {
            OutputFormat::Human => format!("dogwatch {}", version),
            OutputFormat::Json => json!({ "type": "version", "version": version }).to_string(),
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(&json!({ "type": "version", "version": version }))
                    .unwrap_or_default()
            }
        }
    }

    /// Print a watchlist. Data is printed even in quiet mode: it is the
    /// command's result, not a status message.
    pub fn items(&self, kind: WatchlistKind, items: &[WatchlistItem]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("Your {} watchlist is empty", kind);
                    return;
                }
                println!("{}", items_table(kind, items));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "watchlist",
                    "kind": kind,
                    "items": items
                }));
            }
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

fn items_table(kind: WatchlistKind, items: &[WatchlistItem]) -> Table {
    let id_header = match kind {
        WatchlistKind::Movie => "IMDB ID",
        WatchlistKind::Tv => "TVDB ID",
    };

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(id_header).add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.title),
            Cell::new(item.id_for(kind).unwrap_or("-")),
            Cell::new(item.year.as_deref().unwrap_or("")),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

/// Show the first and last two characters of a secret.
pub fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
