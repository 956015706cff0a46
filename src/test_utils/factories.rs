//! Test data factories.

use secrecy::SecretString;
use time::Duration;

use crate::{
    application::jwt::TokenCodec,
    domain::entities::{role::Role, subject::Subject},
};

pub const TEST_ACCESS_SECRET: &str = "test-access-secret-0123456789";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-0123456789";

/// Codec with fixed secrets, 1h access and 7d refresh lifetimes.
pub fn create_test_codec() -> TokenCodec {
    TokenCodec::new(
        &SecretString::new(TEST_ACCESS_SECRET.into()),
        &SecretString::new(TEST_REFRESH_SECRET.into()),
        Duration::hours(1),
        Duration::days(7),
    )
    .expect("test secrets are valid")
}

pub fn create_test_subject(overrides: impl FnOnce(&mut Subject)) -> Subject {
    let mut subject = Subject {
        id: 1,
        email: "applicant@example.com".to_string(),
        role: Role::Applicant,
        organization_ref: None,
    };
    overrides(&mut subject);
    subject
}
