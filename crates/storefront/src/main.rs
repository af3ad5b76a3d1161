use crate::prelude::*;
use clap::Parser;

mod browse;
mod controller;
mod error;
#[cfg(test)]
mod fixtures;
mod list;
mod prelude;
mod render;
mod show;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "List, filter, sort and inspect the products of the demo store API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Store API base URL
    #[clap(
        long,
        env = "STOREFRONT_API_BASE",
        global = true,
        default_value = source::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Number of products requested per page
    #[clap(long, global = true, default_value_t = source::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Whether to display additional information.
    #[clap(long, global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Fetch product pages and print the filtered, sorted list
    List(crate::list::ListOptions),

    /// Show the detail view of a single product
    Show(crate::show::ShowOptions),

    /// Browse the catalog interactively (search, filter, sort, load more)
    Browse(crate::browse::BrowseOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Show(options) => crate::show::run(options, app.global).await,
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
