//! `nanning folder` handlers

use crate::commands::dispatch::CommandContext;
use crate::commands::output::emit;
use nanning_core::error::Result;
use nanning_core::folder::NewFolder;

pub struct FolderOptions<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub parent: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub color: Option<&'a str>,
}

pub fn handle_create(ctx: &CommandContext, opts: FolderOptions) -> Result<()> {
    let mut folder = NewFolder::new(opts.id, opts.name);
    if let Some(parent) = opts.parent {
        folder = folder.with_parent(parent);
    }
    if let Some(icon) = opts.icon {
        folder = folder.with_icon(icon);
    }
    if let Some(color) = opts.color {
        folder = folder.with_color(color);
    }

    let created = ctx.with_db(|db| db.create_folder(&folder))?;
    emit(ctx, &created, |f| println!("Created folder {}", f.id))
}

pub fn handle_list(ctx: &CommandContext) -> Result<()> {
    let folders = ctx.with_db(|db| db.list_folders())?;
    emit(ctx, &folders, |folders| {
        for folder in folders {
            match &folder.parent_id {
                Some(parent) => println!("{}  {}  (in {})", folder.id, folder.name, parent),
                None => println!("{}  {}", folder.id, folder.name),
            }
        }
    })
}
