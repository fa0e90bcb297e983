#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("invalid partition count {0}: topic has no known partitions")]
    InvalidPartitionCount(i32),
}
