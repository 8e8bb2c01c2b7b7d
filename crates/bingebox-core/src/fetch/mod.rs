mod client;
mod tmdb;

pub use client::{FetchJson, HttpFetcher};
pub use tmdb::TmdbApi;

#[cfg(test)]
pub(crate) use tmdb::testing;
