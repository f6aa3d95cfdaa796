//! Routing from parsed subcommands to handlers

use crate::cli::{
    Commands, DocCommands, FileCommands, FolderCommands, IndexCommands, SettingCommands,
    ThemeCommands,
};
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{doc, file, folder, index, init, search, setting, theme};
use nanning_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => init::execute(ctx),
            Commands::Doc { command } => execute_doc(ctx, command),
            Commands::Search { query } => search::execute(ctx, &query.join(" ")),
            Commands::Theme { command } => execute_theme(ctx, command),
            Commands::Folder { command } => execute_folder(ctx, command),
            Commands::Setting { command } => execute_setting(ctx, command),
            Commands::File { command } => execute_file(ctx, command),
            Commands::Index { command } => execute_index(ctx, command),
        }
    }
}

fn execute_doc(ctx: &CommandContext, command: &DocCommands) -> Result<()> {
    match command {
        DocCommands::Create(args) => doc::handle_create(ctx, args),
        DocCommands::Update(args) => doc::handle_update(ctx, args),
        DocCommands::Get { id } => doc::handle_get(ctx, id),
        DocCommands::List => doc::handle_list(ctx),
        DocCommands::Delete { id } => doc::handle_delete(ctx, id),
        DocCommands::Restore { id } => doc::handle_restore(ctx, id),
    }
}

fn execute_theme(ctx: &CommandContext, command: &ThemeCommands) -> Result<()> {
    match command {
        ThemeCommands::Save { file, name, mode } => {
            theme::handle_save(ctx, file.as_deref(), name.as_deref(), *mode)
        }
        ThemeCommands::Get { id } => theme::handle_get(ctx, id),
        ThemeCommands::List { presets, custom } => {
            let filter = match (*presets, *custom) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            theme::handle_list(ctx, filter)
        }
        ThemeCommands::Delete { id } => theme::handle_delete(ctx, id),
    }
}

fn execute_folder(ctx: &CommandContext, command: &FolderCommands) -> Result<()> {
    match command {
        FolderCommands::Create {
            id,
            name,
            parent,
            icon,
            color,
        } => folder::handle_create(
            ctx,
            folder::FolderOptions {
                id,
                name,
                parent: parent.as_deref(),
                icon: icon.as_deref(),
                color: color.as_deref(),
            },
        ),
        FolderCommands::List => folder::handle_list(ctx),
    }
}

fn execute_setting(ctx: &CommandContext, command: &SettingCommands) -> Result<()> {
    match command {
        SettingCommands::Get { key } => setting::handle_get(ctx, key),
        SettingCommands::Set { key, value } => setting::handle_set(ctx, key, value),
    }
}

fn execute_file(ctx: &CommandContext, command: &FileCommands) -> Result<()> {
    match command {
        FileCommands::Resolve { path } => file::handle_resolve(ctx, path),
        FileCommands::Read { path } => file::handle_read(ctx, path),
        FileCommands::Write { path, content } => {
            file::handle_write(ctx, path, content.as_deref())
        }
        FileCommands::Exists { path } => file::handle_exists(ctx, path),
    }
}

fn execute_index(ctx: &CommandContext, command: &IndexCommands) -> Result<()> {
    match command {
        IndexCommands::Rebuild => index::handle_rebuild(ctx),
        IndexCommands::Status => index::handle_status(ctx),
    }
}
