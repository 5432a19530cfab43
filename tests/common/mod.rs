pub mod fixtures;
pub mod wiremock_helpers;
