pub mod language;
pub mod plan;
pub mod problem;
pub mod submission;
pub mod window;

pub use language::file_extension;
pub use plan::SyncPlanEntry;
pub use problem::{Difficulty, ProblemDetail};
pub use submission::{RawSubmission, SubmissionPage, SubmissionRecord, SubmissionStatus};
pub use window::{compute_yesterday_window, TargetWindow};
