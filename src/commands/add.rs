use super::open_for_action;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task description; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

pub fn cmd(args: AddArgs) -> Result<()> {
    let mut controller = open_for_action();
    let text = args.text.join(" ");

    // An empty description is reported through the banner by the controller
    if let Ok(id) = controller.submit_task(&text) {
        msg_success!(Message::TaskAdded(id, text.trim().to_string()));
    }
    Ok(())
}
