mod async_runtime;
pub mod clock;
pub mod context;
pub mod links;
pub mod scheduler;
pub mod visual;

pub use async_runtime::runtime_handle;
pub use clock::ManualClock;
pub use context::StepBoxContext;
pub use links::{open_local_path, FileLinkResolver, LinkAction, UserNotice};
pub use scheduler::{RepaintHook, TickScheduler};
pub use visual::{
    Indicator, MaterializationLinkView, StepCallbacks, StepView, StepVisual, StepVisualProps,
};
