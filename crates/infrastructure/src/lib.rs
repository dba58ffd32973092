//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_account_repository;

pub use in_memory_account_repository::InMemoryAccountRepository;
