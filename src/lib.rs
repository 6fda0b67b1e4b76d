pub mod anki;
pub mod core;
pub mod persistence;

pub use crate::core::{
    run,
    Config,
    RunReport,
    SuspendError,
};
