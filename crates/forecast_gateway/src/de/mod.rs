pub mod empty_as_none;
pub mod flexible_bool;
