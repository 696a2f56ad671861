// Scanner Module
// Photo acquisition, orientation fix, recognition and result presentation

pub mod acquisition;
pub mod orientation;
pub mod pipeline;
pub mod presenter;

pub use acquisition::request_image;
pub use orientation::normalize;
pub use pipeline::{
    PipelineCoordinator, PipelineRun, PipelineState, resolve_outcome, scan_encoded,
};
pub use presenter::ResultPresenter;
