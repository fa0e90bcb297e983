//! Key-to-partition mapping compatible with Java's `String.hashCode`.
//!
//! Producers and consumers written in other languages route keys with
//! `abs(key.hashCode()) % partitions`; the functions here reproduce that
//! bit-for-bit, including 32-bit wraparound and UTF-16 surrogate pairs.

pub mod error;

pub use error::PartitionError;

/// Returned by [`hash_code_partition`] when no partition can be computed.
pub const NO_PARTITION: i32 = -1;

/// Java `String.hashCode` over the UTF-16 code units of `s`.
///
/// Characters outside the BMP contribute both surrogate code units,
/// so iterating `chars()` here would give different results.
pub fn hash_code(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)))
}

/// Partition for `key` among `partition_count` partitions.
///
/// * `partition_count <= 0` → [`NO_PARTITION`]
/// * empty key → `0`
/// * otherwise `abs(hash_code(key)) % partition_count`
///
/// `abs` wraps like Java's `Math.abs`, so a hash of `i32::MIN` stays negative
/// and yields a non-positive remainder. Kept as is for compatibility.
pub fn hash_code_partition(key: &str, partition_count: i32) -> i32 {
    match try_hash_code_partition(key, partition_count) {
        Ok(p) => p,
        Err(PartitionError::InvalidPartitionCount(_)) => NO_PARTITION,
    }
}

/// Same mapping as [`hash_code_partition`] with the sentinel replaced by an error.
pub fn try_hash_code_partition(key: &str, partition_count: i32) -> Result<i32, PartitionError> {
    if partition_count <= 0 {
        return Err(PartitionError::InvalidPartitionCount(partition_count));
    }
    if key.is_empty() {
        return Ok(0);
    }
    Ok(hash_code(key).wrapping_abs() % partition_count)
}
