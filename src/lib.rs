//! Monthly salary engine.
//!
//! This crate computes an employee's monthly salary from their base salary,
//! shift times, attendance, holidays and salary adjustments, and persists a
//! per-employee, per-month salary summary.
//!
//! The calculation lives in [`calculation`], the data collaborators and their
//! in-memory and SQLite backends in [`store`], and the HTTP surface in [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
