pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Daemon, HashPassword, Health, Init, Login, Notes, Verify, Version};
