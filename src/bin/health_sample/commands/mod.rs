// ABOUTME: Re-exports command modules for health-sample
// ABOUTME: One module per subcommand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod authorize;
pub mod daily;
pub mod demo;
pub mod samples;
pub mod save;
