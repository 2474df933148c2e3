// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod flag_translation;
mod power_state;
mod schema_synthesis;
mod strategies;
