// ABOUTME: Re-exports helper modules for health-sample
// ABOUTME: Provides text and JSON output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod output;
