pub mod daemon;
pub mod hash_password;
pub mod health;
pub mod init;
pub mod login;
pub mod notes;
pub mod verify;
pub mod version;

pub use daemon::Daemon;
pub use hash_password::HashPassword;
pub use health::Health;
pub use init::Init;
pub use login::Login;
pub use notes::Notes;
pub use verify::Verify;
pub use version::Version;
