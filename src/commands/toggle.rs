use super::open_for_action;
use crate::libs::messages::Message;
use crate::libs::task::TaskId;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// ID of the task to toggle
    id: TaskId,
}

pub fn cmd(args: ToggleArgs) -> Result<()> {
    let mut controller = open_for_action();

    if controller.toggle_task(args.id) {
        let completed = controller.tasks().iter().any(|task| task.id == args.id && task.completed);
        msg_success!(Message::TaskToggled(args.id, completed));
    } else {
        msg_info!(Message::TaskNotFoundWithId(args.id));
    }
    Ok(())
}
