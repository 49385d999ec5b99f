//! Employee Lookup API Library
//!
//! A single-endpoint adapter in front of the employee info service. It validates
//! and normalizes lookup requests, forwards them upstream, and trims the response
//! down to the sizes assigned to the employee.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `employee_client`: Employee info service client.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request, upstream and response models.
//! - `routes`: Router and middleware.
//! - `sizes`: Size catalog filtering.
//! - `validation`: Phone, DNI and birth date validation.

pub mod config;
pub mod employee_client;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sizes;
pub mod validation;
