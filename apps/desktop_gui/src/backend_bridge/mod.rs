//! UI-to-backend bridge: command definitions for the worker queue.

pub mod commands;
