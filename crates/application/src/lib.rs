//! Application services and ports.

#![forbid(unsafe_code)]

mod access_config;
mod access_service;
mod account_ports;

pub use access_config::{AccessConfig, SUPERUSER_ROLE_ENV};
pub use access_service::AccessService;
pub use account_ports::AccountRepository;
