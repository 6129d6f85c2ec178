pub mod types;

pub use types::SharescopeError;
