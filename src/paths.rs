use directories_next::ProjectDirs;
use log::warn;
use std::env;
use std::path::PathBuf;

const QUESTIONS_FILE: &str = "questions_db.json";
const STATS_FILE: &str = "user_stats.json";
const SETTINGS_FILE: &str = "settings.json";

const QUESTIONS_FILE_VAR: &str = "DMV_QUIZ_QUESTIONS";
const DATA_DIR_VAR: &str = "DMV_QUIZ_DATA_DIR";

fn get_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_VAR) {
        return PathBuf::from(dir);
    }
    match ProjectDirs::from("", "", "dmv-quiz") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            warn!("Could not locate system directories, using the working directory");
            PathBuf::new()
        }
    }
}

pub fn questions_file() -> PathBuf {
    env::var_os(QUESTIONS_FILE_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(QUESTIONS_FILE))
}

pub fn stats_file() -> PathBuf {
    get_data_dir().join(STATS_FILE)
}

pub fn settings_file() -> PathBuf {
    get_data_dir().join(SETTINGS_FILE)
}
