pub mod accumulator;
pub mod contract;
pub mod error;
pub mod state;

#[cfg(test)]
mod testing;
