//! Preconfigured `HelperRegistry` bundles, one per supported dialect.

pub mod base;
pub mod common;
pub mod sendgrid;
pub mod translate;
