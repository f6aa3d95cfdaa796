//! Output helpers shared by command handlers

use std::io::{self, IsTerminal, Read};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use nanning_core::document::Document;
use nanning_core::error::{NanningError, Result};

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    data: &'a T,
}

/// Success envelope as printed in JSON mode
pub fn success_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(&Envelope {
        success: true,
        data,
    })
    .map_err(|e| NanningError::storage("serialize output", e))
}

/// Print `data` as a JSON envelope, or run `human` in human mode
pub fn emit<T: Serialize>(ctx: &CommandContext, data: &T, human: impl FnOnce(&T)) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => println!("{}", success_json(data)?),
        OutputFormat::Human => human(data),
    }
    Ok(())
}

/// Read all of stdin unless it is a terminal
pub fn read_stdin() -> Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .map_err(|e| NanningError::file_access("read", "<stdin>", e))?;
    Ok(Some(buf))
}

pub fn print_document_line(doc: &Document) {
    println!(
        "{}  {}  [{}]  {}",
        doc.id,
        doc.title,
        doc.doc_type,
        doc.updated_at.format("%Y-%m-%d %H:%M")
    );
}

pub fn print_document(doc: &Document) {
    println!("{}", doc.title);
    println!("id:       {}", doc.id);
    println!("type:     {} ({})", doc.doc_type, doc.language);
    if let Some(folder) = &doc.folder_id {
        println!("folder:   {}", folder);
    }
    if !doc.tags.is_empty() {
        println!("tags:     {}", doc.tags.join(", "));
    }
    println!("created:  {}", doc.created_at.to_rfc3339());
    println!("updated:  {}", doc.updated_at.to_rfc3339());
    if !doc.content.is_empty() {
        println!();
        println!("{}", doc.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = success_json(&vec!["a", "b"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"][1], "b");
    }
}
