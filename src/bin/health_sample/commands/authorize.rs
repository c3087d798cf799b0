// ABOUTME: Consent command for health-sample
// ABOUTME: Requests authorization and prints the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use health_sample::session::HealthSession;

use crate::helpers::output::Output;

/// Request consent once and report it
pub async fn run(session: &HealthSession, output: &Output) -> Result<()> {
    let outcome = session.authorize().await;
    output.authorization(&outcome)
}
