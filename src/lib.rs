pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_util;
