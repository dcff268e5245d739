//! AD-Roles - Directory reconciliation and automatic role assignment.
//!
//! This crate mirrors an external directory (user accounts and groups) into
//! an internal model of Persons, Roles and ADUser/ADGroup records, and
//! automates Person-to-Role assignment by organizational unit name.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
