use super::open_for_action;
use crate::libs::messages::Message;
use crate::libs::task::TaskId;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the task to delete
    id: TaskId,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let mut controller = open_for_action();

    if controller.delete_task(args.id) {
        msg_success!(Message::TaskDeleted(args.id));
    } else {
        msg_info!(Message::TaskNotFoundWithId(args.id));
    }
    Ok(())
}
