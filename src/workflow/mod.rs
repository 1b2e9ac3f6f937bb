pub mod entry_flow;

pub use entry_flow::{EntryFlow, EntryOutcome};
