use std::process::ExitCode;

use kanji_suspend::{
    Config,
    SuspendError,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load_or_create();

    match kanji_suspend::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(SuspendError::DatabaseLocked) => {
            eprintln!("Anki database is locked. Close Anki and try again.");
            ExitCode::FAILURE
        }
        Err(SuspendError::DatabaseNotFound(path)) => {
            eprintln!(
                "Anki database not found at {}. Set \"profile\" or \"collection_path\" in the config file so we know where to look.",
                path.display()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
