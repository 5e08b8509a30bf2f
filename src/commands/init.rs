//! Application configuration initialization command.
//!
//! Runs an interactive wizard for the storage location and key, or removes
//! the configuration file with `--delete`.

use crate::{
    libs::{
        config::{Config, CONFIG_FILE_NAME},
        data_storage::DataStorage,
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        return Ok(());
    }

    let config = Config::init()?;
    config.save()?;

    msg_success!(Message::ConfigSaved);
    msg_info!(Message::ConfigDataDirectory(config.storage.data_storage().base_path().display().to_string()));
    Ok(())
}
