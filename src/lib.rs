//! PatrimonioPro - Progression Engine
//!
//! This crate implements the scoring and progression rules behind the
//! PatrimonioPro training app: the bounded, weighted confidence score, the
//! training streak, and the scripted wizards that feed them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
