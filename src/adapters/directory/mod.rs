//! Directory client adapters.

mod fixture;

pub use fixture::FixtureDirectoryClient;
