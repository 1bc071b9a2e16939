pub mod analysis;
pub mod error;
pub mod log;
pub mod payload;
pub mod search;
pub mod selection;
pub mod table;

pub use analysis::{AnalysisMode, OptimizationMode};
pub use error::{ExperimentError, Result, TableError};
pub use log::{LogClass, LogEntry, SessionLog};
pub use payload::{
    AnalysisRequest, AnalysisResponse, ExperimentData, ExperimentSubmission, ResultSubmission,
    table_from_experiment_payload,
};
pub use search::{HitKind, SearchHit, SearchQuery, SearchResponse, SearchType};
pub use selection::{Selection, SelectionPolicy};
pub use table::Table;
