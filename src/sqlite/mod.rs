// SQLite module - in-process driver for the connector
//
// - config: connection options and the `Connector::connect_sqlite` entry point
// - params: conversion of `RowValues` into named rusqlite bindings
// - query: result extraction and building
// - connection: the `DatabaseHandle` implementation

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteHandle;
pub use query::build_result_set;
