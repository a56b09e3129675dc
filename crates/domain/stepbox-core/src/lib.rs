use serde::{Deserialize, Serialize};

pub mod elapsed;
pub mod link;
pub mod ports;

pub use elapsed::{displayed_elapsed_ms, format_elapsed, next_tick_delay_ms, running_elapsed_ms};
pub use link::{file_location_to_href, FileLink, LOCAL_FILE_SCHEME};
pub use ports::{Clock, HostOpenError, HostOpener};

/// Lifecycle state of a single execution step, as reported by the run data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepState {
    Waiting,
    Running,
    Succeeded,
    Failed,
}

impl StepState {
    pub const ALL: [StepState; 4] = [
        StepState::Waiting,
        StepState::Running,
        StepState::Succeeded,
        StepState::Failed,
    ];

    pub fn is_running(self) -> bool {
        matches!(self, StepState::Running)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepState::Waiting => "WAITING",
            StepState::Running => "RUNNING",
            StepState::Succeeded => "SUCCEEDED",
            StepState::Failed => "FAILED",
        }
    }
}

/// A file produced by a step. `file_location` is either an absolute local path or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Materialization {
    pub file_location: String,
    pub file_name: String,
}

impl Materialization {
    pub fn new(file_location: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            file_location: file_location.into(),
            file_name: file_name.into(),
        }
    }

    pub fn link(&self) -> FileLink {
        FileLink::from_location(&self.file_location)
    }
}

/// The two independent click targets of a step box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepClickTarget {
    /// The state indicator (spinner or dot). Opens state details.
    Indicator,
    /// Anywhere else on the box. Applies the step filter.
    Box,
}

/// Resolves one pointer click into at most one target. The indicator sits on top of the box,
/// so it wins when both report a click.
pub fn route_click(indicator_clicked: bool, box_clicked: bool) -> Option<StepClickTarget> {
    if indicator_clicked {
        Some(StepClickTarget::Indicator)
    } else if box_clicked {
        Some(StepClickTarget::Box)
    } else {
        None
    }
}
