//! `workload-resolver locate` command

use anyhow::Result;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let location = session.resolver.locate(&session.request(""))?;

    println!("root: {}", location.root.display());
    println!("band: {}", location.version_band);
    println!("rid:  {}", session.settings.effective_host_rid());

    Ok(())
}
