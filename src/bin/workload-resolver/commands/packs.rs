//! `workload-resolver packs` command

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::PacksArgs;
use workload_resolver::core::PackKind;

#[derive(Serialize)]
struct PackEntry<'a> {
    id: &'a str,
    kind: PackKind,
    version: &'a str,
    resolved_id: &'a str,
    installed: bool,
    path: PathBuf,
}

pub fn execute(args: PacksArgs, session: &Session) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<PackKind>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let index = session.index()?;

    let entries: Vec<PackEntry<'_>> = index
        .packs()
        .filter(|pack| kind.map_or(true, |k| pack.kind() == k))
        .map(|pack| {
            let path = index.install_path(pack);
            PackEntry {
                id: pack.id(),
                kind: pack.kind(),
                version: pack.version(),
                resolved_id: pack.resolved_id(),
                installed: path.is_dir(),
                path,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No workload packs found for band {}", index.version_band());
        return Ok(());
    }

    for entry in &entries {
        let status = if entry.installed { "installed" } else { "missing" };
        let alias = if entry.resolved_id != entry.id {
            format!(" -> {}", entry.resolved_id)
        } else {
            String::new()
        };
        println!(
            "{:<40} {:<10} {:<16} {}{}",
            entry.id,
            entry.kind.as_str(),
            entry.version,
            status,
            alias
        );
    }

    Ok(())
}
