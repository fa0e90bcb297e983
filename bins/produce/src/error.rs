#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Pipeline(#[from] pipeline::PipelineError),

    #[error("task: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{failed} of {total} records not produced")]
    Incomplete { failed: u64, total: u64 },
}
