mod group_key;
pub use group_key::*;

#[cfg(test)]
mod group_key_test;
