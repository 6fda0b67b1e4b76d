pub mod config;
pub mod errors;
pub mod kanji_list;
pub mod pipeline;
pub mod utils;

pub use config::Config;
pub use errors::SuspendError;
pub use kanji_list::KanjiList;
pub use pipeline::{
    run,
    RunReport,
};
