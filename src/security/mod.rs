pub mod keyring;
pub mod session;
