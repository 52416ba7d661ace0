//! Command workflows shared by the binary and tests

pub mod orchestration;

pub use orchestration::{
    recommend, run_bump, AnalysisArgs, BumpWorkflowArgs, Recommendation, WorkflowResult,
};
