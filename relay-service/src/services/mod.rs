pub mod error;
pub mod fallback;
pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod relay;
pub mod schema;

pub use error::GenerationError;
pub use metrics::{get_metrics, init_metrics};
pub use providers::{ProviderError, TextProvider};
pub use relay::Relay;
