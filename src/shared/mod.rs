pub mod errors;
pub mod shutdown;

pub use errors::DomainError;
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
