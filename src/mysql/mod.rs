// MySQL module - the target engine's driver, built on mysql_async
//
// - config: connection options and the `Connector::connect_mysql` entry point
// - params: conversion of `RowValues` into named mysql_async params
// - query: result extraction and building
// - connection: the `DatabaseHandle` implementation

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{MySqlOptions, MySqlOptionsBuilder};
pub use connection::MySqlHandle;
