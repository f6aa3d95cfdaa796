//! `nanning theme` handlers

use std::fs;
use std::path::Path;

use crate::commands::dispatch::CommandContext;
use crate::commands::output::{emit, read_stdin};
use nanning_core::error::{NanningError, Result};
use nanning_core::theme::{Theme, ThemeInput, ThemeMode};

fn read_definition(file: Option<&Path>) -> Result<String> {
    let raw = match file {
        Some(path) => {
            Some(fs::read_to_string(path).map_err(|e| NanningError::file_access("read", path, e))?)
        }
        None => read_stdin()?,
    };
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(NanningError::invalid_input(
            "theme",
            "no theme definition given (use --file or pipe JSON on stdin)",
        )),
    }
}

fn print_theme_line(theme: &Theme) {
    let marker = if theme.is_preset { "preset" } else { "custom" };
    println!("{}  {}  [{}, {}]", theme.id, theme.name, theme.mode, marker);
}

pub fn handle_save(
    ctx: &CommandContext,
    file: Option<&Path>,
    name: Option<&str>,
    mode: Option<ThemeMode>,
) -> Result<()> {
    let raw = read_definition(file)?;
    let mut input: ThemeInput = serde_json::from_str(&raw)
        .map_err(|e| NanningError::invalid_input("theme", e.to_string()))?;
    if let Some(name) = name {
        input.name = name.to_string();
    }
    if let Some(mode) = mode {
        input.mode = mode;
    }

    let saved = ctx.with_db(|db| db.save_theme(&input))?;
    emit(ctx, &saved, |t| println!("Saved theme {}", t.id))
}

pub fn handle_get(ctx: &CommandContext, id: &str) -> Result<()> {
    let theme = ctx.with_db(|db| db.get_theme(id))?;
    emit(ctx, &theme, |t| {
        print_theme_line(t);
        let stops: Vec<String> = t
            .gradient
            .stops
            .iter()
            .map(|s| format!("{} {}%", s.color, s.position))
            .collect();
        println!("gradient: {}deg, {}", t.gradient.angle, stops.join(", "));
        println!(
            "glass:    opacity {}, blur {}px, border {}",
            t.glass.opacity, t.glass.blur, t.glass.border_opacity
        );
    })
}

/// `presets`: `Some(true)` for presets only, `Some(false)` for user themes
pub fn handle_list(ctx: &CommandContext, presets: Option<bool>) -> Result<()> {
    let themes: Vec<Theme> = ctx
        .with_db(|db| db.list_themes())?
        .into_iter()
        .filter(|t| presets.map_or(true, |want| t.is_preset == want))
        .collect();
    emit(ctx, &themes, |themes| {
        for theme in themes {
            print_theme_line(theme);
        }
    })
}

pub fn handle_delete(ctx: &CommandContext, id: &str) -> Result<()> {
    let removed = ctx.with_db(|db| db.delete_theme(id))?;
    emit(ctx, &serde_json::json!({ "id": id, "deleted": removed }), |_| {
        if removed == 0 {
            println!("Theme {} was not deleted (preset or unknown id)", id);
        } else {
            println!("Deleted theme {}", id);
        }
    })
}
