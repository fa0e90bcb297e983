#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("config ({field}): {detail}")]
    Config { field: &'static str, detail: String },

    #[error("{0}")]
    Partition(#[from] partitioner::PartitionError),

    #[error("input: {0}")]
    Io(#[from] std::io::Error),
}
