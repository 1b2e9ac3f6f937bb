pub mod materializer;
pub mod ports;
pub mod selection;

pub use materializer::LocalMaterializer;
pub use ports::{Materializer, ProblemDetailFetcher, SubmissionFeed};
pub use selection::select_accepted;
