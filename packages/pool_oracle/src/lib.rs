pub mod asset;
pub mod error;
pub mod fixed_point;
pub mod pool;
pub mod reader;
pub mod spot_oracle;
pub mod twap_oracle;

#[cfg(any(test, feature = "testing"))]
pub mod fixture;


use cosmwasm_std::BlockInfo;

/// Pool timestamps are stored modulo 2^32 seconds.
pub const TIMESTAMP_MODULUS: u64 = 1 << 32;

/// Returns the current block time in the same wrapping encoding pools use for
/// `block_timestamp_last`.
pub fn block_timestamp(block: &BlockInfo) -> u32 {
    (block.time.seconds() % TIMESTAMP_MODULUS) as u32
}
