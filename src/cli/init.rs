use crate::config::initialize_config_file;
use std::path::PathBuf;

pub fn handle_init_command(config_path: Option<PathBuf>) {
    match initialize_config_file(config_path.as_deref()) {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error during initialization: {}", e);
            std::process::exit(1);
        }
    }
}
