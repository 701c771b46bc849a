pub mod contract;
pub mod error;
pub mod oracle;
pub mod state;

#[cfg(test)]
mod testing;
