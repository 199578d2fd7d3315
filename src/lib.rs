//! TriptaFittings: DIN 32676 A ferrule and gasket preset catalog
//!
//! Loads the two dimension tables, validates and indexes every preset,
//! and exposes lookup, compatibility checking, and geometry-descriptor
//! generation to the CLI and to CAD-host integrations.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod geometry;
