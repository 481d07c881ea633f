//! # IO Module
//!
//! The interface layer between HTTP clients and the entity managers: request
//! parsing, DTO mapping and error translation. No business rules live here.

pub mod rest;
