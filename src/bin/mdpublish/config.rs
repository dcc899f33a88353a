use std::env;
use std::path::PathBuf;

use mdpublish::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()));

    if let Some(exe_dir) = exe_dir {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    if let Some(cfg_dir) = dirs::config_dir() {
        if cfg_dir.join(CFG_FILE_NAME).exists() {
            return Some(cfg_dir.join(CFG_FILE_NAME));
        }
    }

    None
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = cfg_path.or_else(get_config_path);
    let Some(config_path) = config_path else {
        return Err("Could not find mdpublish configuration".to_string());
    };

    println!("Reading config from {}", config_path.display());
    let config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(ref log) = config.log {
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled on console only"),
        }
    }

    Ok(config)
}
