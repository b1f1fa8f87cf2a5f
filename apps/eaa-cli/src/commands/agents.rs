//! Connector listing.

use clap::Args;

use eaa_provision::datasource;

use crate::commands::connect;
use crate::error::CliResult;
use crate::output::render_table;
use crate::GlobalArgs;

#[derive(Args)]
pub struct AgentsArgs {
    /// Narrow the listing to one connector name
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn execute(global: &GlobalArgs, args: AgentsArgs) -> CliResult<()> {
    let client = connect(global)?;
    let agents = datasource::agents(&client, args.name.as_deref()).await?;

    let rows: Vec<Vec<String>> = agents
        .iter()
        .map(|agent| {
            vec![
                agent.name.clone(),
                agent.reach.to_string(),
                agent.state.to_string(),
                agent.os_version.clone().unwrap_or_default(),
                agent.public_ip.clone().unwrap_or_default(),
                agent.uuid_url.clone(),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&["NAME", "REACH", "STATE", "OS", "PUBLIC IP", "ID"], &rows)
    );
    Ok(())
}
