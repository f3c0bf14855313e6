//! Perdura — typed configuration for durable service endpoints.
//!
//! This crate re-exports all Perdura components for convenience.

#![doc = include_str!("../README.md")]

pub use perdura_config as config;
pub use perdura_core as core;

pub use perdura_config::{ConfigFile, HandlerOptions, InvocationOptions, ServiceOptions, Settings};
pub use perdura_core::{
    Endpoint, HandlerBinding, InvocationConfig, RetryPolicy, Service, ServiceName,
};
