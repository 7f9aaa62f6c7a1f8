//! Infrastructure layer.
//!
//! Record storage, the time source and process configuration.

mod clock;
mod config;
mod in_memory;
mod repository;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigurationError, DEFAULT_PAGE_SIZE, DEFAULT_PORT, ServerConfig};
pub use in_memory::InMemoryTaskRepository;
pub use repository::TaskRepository;
