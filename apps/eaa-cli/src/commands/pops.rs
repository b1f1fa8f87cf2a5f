//! Point-of-presence listing.

use clap::Args;

use eaa_provision::datasource;

use crate::commands::connect;
use crate::error::CliResult;
use crate::output::render_table;
use crate::GlobalArgs;

#[derive(Args)]
pub struct PopsArgs {
    /// Narrow the listing to one region
    #[arg(long)]
    pub region: Option<String>,
}

pub async fn execute(global: &GlobalArgs, args: PopsArgs) -> CliResult<()> {
    let client = connect(global)?;
    let pops = datasource::pops(&client, args.region.as_deref()).await?;

    let rows: Vec<Vec<String>> = pops
        .iter()
        .map(|pop| {
            vec![
                pop.region.clone(),
                pop.name.clone(),
                pop.pop_type.clone(),
                pop.facility.clone(),
                pop.uuid_url.clone(),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&["REGION", "NAME", "TYPE", "FACILITY", "ID"], &rows)
    );
    Ok(())
}
