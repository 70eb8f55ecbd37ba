use std::env;
use std::path::Path;

use crate::constants::envvars;

pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        eprintln!("Loaded local .env")
    }
    // Also load a .env sitting next to the credentials file, if one is configured
    if let Ok(config_file) = env::var(envvars::CONFIG_FILE) {
        if let Some(dir) = Path::new(&config_file).parent() {
            let config_dotenv = dir.join(".env");
            if config_dotenv.is_file() && dotenv::from_path(&config_dotenv).is_ok() {
                eprintln!("Loaded {}", config_dotenv.display());
            }
        }
    }
}
