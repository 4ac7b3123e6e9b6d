//! `workload-resolver workloads` command

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::WorkloadsArgs;

#[derive(Serialize)]
struct WorkloadEntry<'a> {
    id: &'a str,
    description: Option<&'a str>,
    #[serde(rename = "abstract")]
    is_abstract: bool,
    manifest: Option<&'a str>,
    extends: &'a [String],
    platforms: &'a [String],
    packs: Vec<String>,
}

pub fn execute(args: WorkloadsArgs, session: &Session) -> Result<()> {
    let index = session.index()?;

    let entries: Vec<WorkloadEntry<'_>> = index
        .workloads()
        .map(|workload| WorkloadEntry {
            id: &workload.id,
            description: workload.description.as_deref(),
            is_abstract: workload.is_abstract,
            manifest: index.defining_manifest(&workload.id),
            extends: &workload.extends,
            platforms: &workload.platforms,
            packs: index.workload_packs(&workload.id).unwrap_or_default(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No workloads found for band {}", index.version_band());
        return Ok(());
    }

    for entry in &entries {
        let marker = if entry.is_abstract { " (abstract)" } else { "" };
        match entry.description {
            Some(description) => println!("{}{}: {}", entry.id, marker, description),
            None => println!("{}{}", entry.id, marker),
        }
        if !entry.packs.is_empty() {
            println!("    packs: {}", entry.packs.join(", "));
        }
    }

    Ok(())
}
