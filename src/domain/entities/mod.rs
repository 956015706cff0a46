pub mod role;
pub mod subject;
