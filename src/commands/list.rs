use super::{load_config, open};
use crate::libs::view::TerminalView;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print the list as HTML markup instead of a table
    #[arg(long)]
    html: bool,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let config = load_config();
    let view = if args.html { TerminalView::html() } else { TerminalView::new() };

    // Initialization draws the list and any startup notice
    open(&config, view);
    Ok(())
}
