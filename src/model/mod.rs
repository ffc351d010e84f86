//! Schema descriptors: tables, columns and favorite join tables as plain data.

pub mod builtin;
pub mod resolved;
pub mod validator;

pub use resolved::*;
pub use validator::*;
