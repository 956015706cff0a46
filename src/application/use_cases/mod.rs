pub mod authorization;
pub mod session;
