//! Pipeline state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear state machine of the validation pipeline.
///
/// `Created → Loaded → Explored → Deduplicated → ColumnsDropped`, with
/// `Failed` reachable from any non-terminal state. `ColumnsDropped` is the
/// success terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PipelineStage {
    /// Pipeline constructed, no table loaded yet.
    #[default]
    Created,
    /// Table loaded from disk.
    Loaded,
    /// Diagnostics computed and reported.
    Explored,
    /// Duplicate rows removed by the primary-key columns.
    Deduplicated,
    /// Configured columns dropped; the pipeline succeeded.
    ColumnsDropped,
    /// A stage failed; the table keeps the state the last successful stage
    /// produced.
    Failed,
}

impl PipelineStage {
    /// True for the two terminal states.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::ColumnsDropped | Self::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Loaded => "loaded",
            Self::Explored => "explored",
            Self::Deduplicated => "deduplicated",
            Self::ColumnsDropped => "columns_dropped",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}
