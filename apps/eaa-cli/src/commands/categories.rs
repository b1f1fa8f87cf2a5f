//! Application-category listing.

use clap::Args;

use eaa_provision::datasource;

use crate::commands::connect;
use crate::error::CliResult;
use crate::output::render_table;
use crate::GlobalArgs;

#[derive(Args)]
pub struct CategoriesArgs {
    /// Narrow the listing to one category name
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn execute(global: &GlobalArgs, args: CategoriesArgs) -> CliResult<()> {
    let client = connect(global)?;
    let categories = datasource::app_categories(&client, args.name.as_deref()).await?;

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|category| vec![category.name.clone(), category.uuid_url.clone()])
        .collect();
    print!("{}", render_table(&["NAME", "ID"], &rows));
    Ok(())
}
