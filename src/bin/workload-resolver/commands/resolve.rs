//! `workload-resolver resolve` command

use anyhow::Result;

use super::Session;
use crate::cli::ResolveArgs;
use workload_resolver::ops::missing_pack_diagnostics;
use workload_resolver::util::diagnostic::{emit, MissingWorkloadPackError};
use workload_resolver::{ResolutionOutcome, SdkResult};

pub fn execute(args: ResolveArgs, session: &Session) -> Result<()> {
    let mut request = session.request(&args.name);
    if let Some(version) = args.version {
        request = request.with_version(version);
    }

    let outcome = session.resolver.resolve(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&args.name, &outcome);
    }

    let Some(result) = outcome.as_success() else {
        return Ok(());
    };

    let missing = result.missing_packs();
    if missing.is_empty() {
        return Ok(());
    }

    let index = session.resolver.index_for(&request)?;
    if args.deny_missing {
        let pack = &missing[0];
        let workloads = index.workloads_containing(&pack.id, session.resolver.host_rid());
        return Err(MissingWorkloadPackError {
            pack: pack.id.clone(),
            version: pack.version.clone().unwrap_or_default(),
            help: workloads
                .first()
                .map(|w| format!("Install the `{}` workload", w)),
        }
        .into());
    }

    for diagnostic in missing_pack_diagnostics(result, &index, session.resolver.host_rid()) {
        emit(&diagnostic, session.color);
    }
    Ok(())
}

fn print_outcome(name: &str, outcome: &ResolutionOutcome) {
    match outcome {
        ResolutionOutcome::NotHandled => {
            println!("`{}` is not a workload pack (not handled)", name);
        }
        ResolutionOutcome::Success(result) => print_result(result),
    }
}

fn print_result(result: &SdkResult) {
    if result.import_paths().is_empty() && result.items().is_empty() {
        println!("resolved with no import paths");
    }

    for path in result.import_paths() {
        println!("import:   {}", path.display());
    }

    if let Some(version) = result.version() {
        println!("version:  {}", version);
    }

    for (key, value) in result.properties().iter() {
        println!("property: {} = {}", key, value);
    }

    for (key, item) in result.items().iter() {
        let metadata: Vec<String> = item
            .metadata()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        if metadata.is_empty() {
            println!("item:     {} = {}", key, item.value());
        } else {
            println!("item:     {} = {} ({})", key, item.value(), metadata.join(", "));
        }
    }
}
