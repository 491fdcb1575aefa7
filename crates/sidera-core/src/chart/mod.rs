pub mod engine;
pub mod request;
pub mod snapshot;

pub use engine::{ChartEngine, EngineSettings};
pub use request::ChartRequest;
pub use snapshot::{ChartKind, ChartSnapshot};
