pub mod core;

pub use self::core::{AopError, AopResult};
