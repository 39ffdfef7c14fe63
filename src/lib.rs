pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod models;
pub mod parser;
pub mod session;
pub mod storage;
pub mod store;
pub mod utils;

pub use config::Config;
pub use models::{Task, TaskDetail};
pub use parser::{Instruction, ParseError};
pub use session::Messages;
pub use storage::{LoadReport, Storage, StorageError};
pub use store::{StoreError, TaskStore};
pub use utils::Profile;
