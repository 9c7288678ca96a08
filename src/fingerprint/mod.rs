mod digest;
pub use digest::*;
