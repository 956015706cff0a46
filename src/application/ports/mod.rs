pub mod credential_verifier;
pub mod revocation_store;
