pub mod condition;
pub mod decision;
pub mod value;

// Flattened for `crate::core::Value` style imports.
pub use condition::{AsAny, Condition, RestartOption};
pub use decision::Decision;
pub use value::{ExpectedType, Value};
