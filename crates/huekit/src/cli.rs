//! Command-line interface.
//!
//! [`Cli`] is the clap definition; [`run`] executes a parsed command against
//! a [`Config`] and writes everything to the given writer, so commands can
//! be driven from tests without a terminal.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand};
use huekit_palette::{
    compile_theme_css_strict, generate_palette, hex_to_rgb, normalize_hex, parse_theme_css,
    ColorScheme, ContrastChoice, ContrastReport, InteractionResolver, PaletteRole, ShadeScale,
};
use huekit_store::{
    effective_scheme, root_classes, FileStore, Preferences, ThemeMode, ThemeRepository,
};
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::session::ThemeEditor;
use crate::swatch::swatch;

/// Generate color palettes and compile theme CSS
#[derive(Debug, Parser)]
#[command(name = "huekit", version)]
#[command(about = "Generate color palettes and compile theme CSS")]
pub struct Cli {
    /// Config file (default: $HUEKIT_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory of saved themes and preferences
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the 11-stop shade scale of a color
    Palette {
        /// Hex color, with or without '#'
        color: String,
    },
    /// Show white and black text contrast on a color
    Contrast { color: String },
    /// Show the hover/active color derived from a color
    Interaction { color: String },
    /// Compile theme CSS without saving
    Compile(CompileArgs),
    /// Save a theme to the store
    Save(SaveArgs),
    /// List saved themes, newest first
    List,
    /// Show a saved theme by id or class name
    Show { theme: String },
    /// Delete a saved theme by id
    Delete { id: String },
    /// Export all saved themes as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import themes from a JSON export, merging by id
    Import { path: PathBuf },
    /// Activate a saved theme (or the brand default when omitted)
    Apply {
        theme: Option<String>,

        /// Current classes of the document root
        #[arg(long, default_value = "")]
        classes: String,
    },
    /// Show or set the light/dark mode preference
    Mode { mode: Option<ThemeMode> },
    /// Read a compiled theme stylesheet
    Inspect {
        /// CSS file to read
        #[arg(required_unless_present = "theme")]
        path: Option<PathBuf>,

        /// Read the CSS of a saved theme instead
        #[arg(long, conflicts_with = "path")]
        theme: Option<String>,
    },
}

/// Palette inputs shared by `compile` and `save`.
///
/// Giving an accent enables separate accent colors; giving a dark color
/// enables separate dark mode.
#[derive(Debug, Clone, Default, Args)]
pub struct ThemeArgs {
    /// Theme name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub primary: Option<String>,

    #[arg(long)]
    pub accent: Option<String>,

    #[arg(long)]
    pub primary_dark: Option<String>,

    #[arg(long)]
    pub accent_dark: Option<String>,

    /// Text color on primary: white or black
    #[arg(long)]
    pub primary_contrast: Option<ContrastChoice>,

    /// Text color on accent: white or black
    #[arg(long)]
    pub accent_contrast: Option<ContrastChoice>,

    /// Reject invalid colors instead of emitting partial CSS
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub theme: ThemeArgs,

    /// Class name to compile under (default: derived from --name)
    #[arg(long)]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub theme: ThemeArgs,

    /// Update the saved theme with this id instead of creating one
    #[arg(long, value_name = "ID")]
    pub update: Option<String>,
}

impl ThemeArgs {
    fn apply_to(&self, editor: &mut ThemeEditor, now: Instant) {
        if let Some(name) = &self.name {
            editor.set_name(name.clone());
        }
        if self.primary_dark.is_some() || self.accent_dark.is_some() {
            editor.set_use_separate_dark_mode(true, now);
        }
        if self.accent.is_some() || self.accent_dark.is_some() {
            editor.set_use_separate_accent(true, now);
        }

        let colors = [
            (PaletteRole::Primary, &self.primary, ColorScheme::Light),
            (PaletteRole::Primary, &self.primary_dark, ColorScheme::Dark),
            (PaletteRole::Accent, &self.accent, ColorScheme::Light),
            (PaletteRole::Accent, &self.accent_dark, ColorScheme::Dark),
        ];
        for (role, color, scheme) in colors {
            if let Some(color) = color {
                editor.set_color(role, color, Some(scheme), now);
            }
        }

        if let Some(contrast) = self.primary_contrast {
            editor.set_contrast(PaletteRole::Primary, contrast, None, now);
        }
        if let Some(contrast) = self.accent_contrast {
            editor.set_contrast(PaletteRole::Accent, contrast, None, now);
        }
        editor.flush();
    }
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

/// Runs `cli` with `config`, writing output to `out`.
pub fn run(cli: &Cli, config: &Config, out: &mut impl Write) -> Result<()> {
    let ctx = Ctx {
        json: cli.json,
        colored: !cli.json && console::colors_enabled(),
    };
    let store_dir = cli.store.clone().unwrap_or_else(|| config.store_dir());
    tracing::debug!(store = %store_dir.display(), command = ?cli.command, "running");

    match &cli.command {
        Commands::Palette { color } => palette(&ctx, color, out),
        Commands::Contrast { color } => contrast(&ctx, color, out),
        Commands::Interaction { color } => interaction(&ctx, config, color, out),
        Commands::Compile(args) => compile(config, args, out),
        Commands::Save(args) => save(&ctx, config, &store_dir, args, out),
        Commands::List => list(&ctx, config, &store_dir, out),
        Commands::Show { theme } => show(&ctx, &store_dir, theme, out),
        Commands::Delete { id } => delete(&ctx, &store_dir, id, out),
        Commands::Export { output } => export(&store_dir, output.as_deref(), out),
        Commands::Import { path } => import(&ctx, &store_dir, path, out),
        Commands::Apply { theme, classes } => {
            apply(&ctx, &store_dir, theme.as_deref(), classes, out)
        }
        Commands::Mode { mode } => mode_command(&ctx, &store_dir, *mode, out),
        Commands::Inspect { path, theme } => {
            inspect(&ctx, &store_dir, path.as_deref(), theme.as_deref(), out)
        }
    }
}

struct Ctx {
    json: bool,
    colored: bool,
}

fn repository(store_dir: &Path) -> ThemeRepository<FileStore> {
    ThemeRepository::new(FileStore::new(store_dir))
}

fn editor(config: &Config) -> ThemeEditor {
    ThemeEditor::new(config.client_id.clone())
        .with_debounce(config.debounce())
        .with_cache_policy(config.cache_policy())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn checked_color(color: &str) -> Result<String> {
    let normalized = normalize_hex(color);
    hex_to_rgb(&normalized).with_context(|| format!("cannot use '{}'", color))?;
    Ok(normalized)
}

fn write_scale(ctx: &Ctx, scale: &ShadeScale, out: &mut impl Write) -> Result<()> {
    for (shade, rgb) in scale.iter() {
        let hex = rgb.to_hex();
        let text = ContrastReport::for_color(&hex).recommended();
        writeln!(
            out,
            "{:>4}  {}  {}",
            shade.value(),
            swatch(&hex, rgb, text, ctx.colored),
            rgb.to_css()
        )?;
    }
    Ok(())
}

// ─── Color commands ─────────────────────────────────────────────────────────

fn palette(ctx: &Ctx, color: &str, out: &mut impl Write) -> Result<()> {
    let color = checked_color(color)?;
    let scale = generate_palette(&color);
    if ctx.json {
        return write_json(out, &scale);
    }
    write_scale(ctx, &scale, out)
}

fn contrast(ctx: &Ctx, color: &str, out: &mut impl Write) -> Result<()> {
    let color = checked_color(color)?;
    let report = ContrastReport::for_color(&color);
    if ctx.json {
        return write_json(
            out,
            &json!({
                "color": color,
                "white": report.white,
                "black": report.black,
                "recommended": report.recommended(),
            }),
        );
    }
    for choice in ContrastChoice::ALL {
        let marker = if choice == report.recommended() { "*" } else { " " };
        writeln!(out, "{} {}", marker, report.label(choice))?;
    }
    Ok(())
}

fn interaction(ctx: &Ctx, config: &Config, color: &str, out: &mut impl Write) -> Result<()> {
    let color = checked_color(color)?;
    let mut resolver = InteractionResolver::new(config.cache_policy());
    let derived = resolver.resolve(&color);
    if ctx.json {
        return write_json(out, &json!({ "color": color, "interaction": derived }));
    }
    writeln!(out, "{}", derived)?;
    Ok(())
}

// ─── Theme commands ─────────────────────────────────────────────────────────

fn compile(config: &Config, args: &CompileArgs, out: &mut impl Write) -> Result<()> {
    let mut editor = editor(config);
    args.theme.apply_to(&mut editor, Instant::now());

    let class = args
        .class
        .clone()
        .unwrap_or_else(|| editor.css_class_name(Utc::now().timestamp_millis()));
    let css = if args.theme.strict {
        compile_theme_css_strict(&editor.theme_input(class))?
    } else {
        editor.compiled_css(class)
    };
    write!(out, "{}", css)?;
    Ok(())
}

fn save(
    ctx: &Ctx,
    config: &Config,
    store_dir: &Path,
    args: &SaveArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut repo = repository(store_dir);
    let mut editor = editor(config);

    if let Some(id) = &args.update {
        let record = repo
            .get(id)?
            .with_context(|| format!("no saved theme with id '{}'", id))?;
        editor.load(&record);
    }
    args.theme.apply_to(&mut editor, Instant::now());

    let now = Utc::now();
    if args.theme.strict {
        let class = editor.css_class_name(now.timestamp_millis());
        compile_theme_css_strict(&editor.theme_input(class))?;
    }
    let record = editor
        .save(&mut repo, now)
        .context("failed to save theme")?;

    if ctx.json {
        return write_json(out, &record);
    }
    writeln!(out, "saved {} ({})", record.id, record.css_class_name)?;
    Ok(())
}

fn list(ctx: &Ctx, config: &Config, store_dir: &Path, out: &mut impl Write) -> Result<()> {
    let records = repository(store_dir).list()?;
    if ctx.json {
        return write_json(out, &records);
    }
    if records.is_empty() {
        writeln!(out, "no saved themes")?;
        return Ok(());
    }

    let now = Utc::now();
    for record in &records {
        let badge = if record.is_recent(now, config.recent_days) {
            format!(" {}", console::style("new").green().bold())
        } else {
            String::new()
        };
        writeln!(
            out,
            "{:<28} {:<24} {}{}",
            record.id,
            record.label,
            record.created_at.format("%Y-%m-%d"),
            badge
        )?;
    }
    Ok(())
}

fn show(ctx: &Ctx, store_dir: &Path, theme: &str, out: &mut impl Write) -> Result<()> {
    let record = repository(store_dir)
        .find(theme)?
        .with_context(|| format!("no saved theme '{}'", theme))?;
    if ctx.json {
        return write_json(out, &record);
    }

    writeln!(out, "{} ({})", record.label, record.id)?;
    writeln!(out, "class:    {}", record.css_class_name)?;
    writeln!(out, "created:  {}", record.created_at.to_rfc3339())?;
    writeln!(out, "modified: {}", record.modified_at.to_rfc3339())?;
    for (role, palette) in [("primary", &record.primary), ("accent", &record.accent)] {
        writeln!(
            out,
            "{:<8}  light {} / {}  dark {} / {}",
            role,
            palette.light.default,
            palette.light.contrast,
            palette.dark.default,
            palette.dark.contrast
        )?;
    }
    writeln!(out)?;
    write!(out, "{}", record.css)?;
    Ok(())
}

fn delete(ctx: &Ctx, store_dir: &Path, id: &str, out: &mut impl Write) -> Result<()> {
    let deleted = repository(store_dir).delete(id)?;
    if ctx.json {
        return write_json(out, &json!({ "id": id, "deleted": deleted }));
    }
    if !deleted {
        bail!("no saved theme with id '{}'", id);
    }
    writeln!(out, "deleted {}", id)?;
    Ok(())
}

fn export(store_dir: &Path, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let json = repository(store_dir).export_json()?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => writeln!(out, "{}", json)?,
    }
    Ok(())
}

fn import(ctx: &Ctx, store_dir: &Path, path: &Path, out: &mut impl Write) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let summary = repository(store_dir)
        .import_json(&json)
        .with_context(|| format!("failed to import {}", path.display()))?;
    if ctx.json {
        return write_json(
            out,
            &json!({ "inserted": summary.inserted, "updated": summary.updated }),
        );
    }
    writeln!(
        out,
        "imported {} new, {} updated",
        summary.inserted, summary.updated
    )?;
    Ok(())
}

// ─── Preferences ────────────────────────────────────────────────────────────

fn apply(
    ctx: &Ctx,
    store_dir: &Path,
    theme: Option<&str>,
    classes: &str,
    out: &mut impl Write,
) -> Result<()> {
    let mut repo = repository(store_dir);
    let mut prefs = Preferences::load(repo.store())?;
    match theme {
        Some(theme) => {
            let record = repo
                .find(theme)?
                .with_context(|| format!("no saved theme '{}'", theme))?;
            prefs.theme = record.css_class_name;
        }
        None => prefs.theme.clear(),
    }
    prefs.save(repo.store_mut())?;

    let scheme = effective_scheme(prefs.theme_mode);
    let root = root_classes(classes, &prefs.theme, scheme.is_dark());
    if ctx.json {
        return write_json(
            out,
            &json!({
                "theme": prefs.theme,
                "themeMode": prefs.theme_mode,
                "scheme": scheme,
                "rootClasses": root,
            }),
        );
    }
    writeln!(out, "{}", root)?;
    Ok(())
}

fn mode_command(
    ctx: &Ctx,
    store_dir: &Path,
    mode: Option<ThemeMode>,
    out: &mut impl Write,
) -> Result<()> {
    let mut repo = repository(store_dir);
    let mut prefs = Preferences::load(repo.store())?;
    if let Some(mode) = mode {
        prefs.theme_mode = mode;
        prefs.save(repo.store_mut())?;
    }

    let scheme = effective_scheme(prefs.theme_mode);
    if ctx.json {
        return write_json(out, &json!({ "themeMode": prefs.theme_mode, "scheme": scheme }));
    }
    writeln!(out, "{} ({})", prefs.theme_mode, scheme)?;
    Ok(())
}

// ─── Inspect ────────────────────────────────────────────────────────────────

fn inspect(
    ctx: &Ctx,
    store_dir: &Path,
    path: Option<&Path>,
    theme: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let css = match (path, theme) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(theme)) => {
            repository(store_dir)
                .find(theme)?
                .with_context(|| format!("no saved theme '{}'", theme))?
                .css
        }
        (None, None) => bail!("give a CSS file or --theme"),
    };
    let sheet = parse_theme_css(&css).context("not a theme stylesheet")?;
    if ctx.json {
        return write_json(out, &sheet);
    }

    for rule in &sheet.rules {
        writeln!(out, ".{}  ({} declarations)", rule.selector, rule.declarations.len())?;
        for role in [PaletteRole::Primary, PaletteRole::Accent] {
            let shades = rule.shades(role);
            if shades.is_empty() {
                continue;
            }
            let row: Vec<String> = shades
                .iter()
                .map(|(shade, rgb)| {
                    let label = shade.value().to_string();
                    let text = ContrastReport::for_color(&rgb.to_hex()).recommended();
                    swatch(&label, *rgb, text, ctx.colored)
                })
                .collect();
            let text = rule
                .get(&format!("--color-theme-{}-contrast", role))
                .unwrap_or("-");
            writeln!(out, "  {:<8}{}  text {}", role.as_str(), row.join(""), text)?;
        }
    }
    Ok(())
}
