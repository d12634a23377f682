// Service exports
pub mod directory;
pub mod samples;
pub mod state;
pub mod store;

pub use directory::{DirectoryClient, DirectoryError, DirectoryLoader, DirectorySnapshot};
pub use samples::sample_directory;
pub use state::HubState;
pub use store::{KvStore, StoreError, StoreKey, StoreStats};
