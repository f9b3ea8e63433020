pub mod aggregate;
pub mod config;
pub mod operators;
mod orchestrator;
pub mod selection;
mod types;

pub use config::RmpConfig;
pub use orchestrator::{output_title, process, process_stack, SliceResult};
pub use selection::SliceSelection;
pub use types::{EnhanceLevels, EnhanceVariant, NoOpReporter, OperatorKind, Progress, ProgressReporter};
