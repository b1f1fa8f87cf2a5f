//! Identity-provider listing with directories and groups.

use clap::Args;

use eaa_provision::datasource;

use crate::commands::connect;
use crate::error::CliResult;
use crate::output::render_table;
use crate::GlobalArgs;

#[derive(Args)]
pub struct IdpsArgs {
    /// Narrow the listing to one identity provider
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn execute(global: &GlobalArgs, args: IdpsArgs) -> CliResult<()> {
    let client = connect(global)?;
    let idps = datasource::idps(&client, args.name.as_deref()).await?;

    let mut rows = Vec::new();
    for idp in &idps {
        if idp.directories.is_empty() {
            rows.push(vec![idp.name.clone(), String::new(), String::new()]);
            continue;
        }
        for directory in &idp.directories {
            let groups: Vec<&str> = directory
                .groups
                .iter()
                .map(|group| group.name.as_str())
                .collect();
            rows.push(vec![
                idp.name.clone(),
                directory.name.clone(),
                groups.join(", "),
            ]);
        }
    }
    print!("{}", render_table(&["IDP", "DIRECTORY", "GROUPS"], &rows));
    Ok(())
}
