pub mod storage;
pub mod types;

pub use storage::{clear_session, load_session, save_session};
pub use types::{reconcile, Session, DEFAULT_TTL_SECS};
