// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ajr-engine: the Step Executor that drives a Task Graph to completion or
//! suspension (§4.4), and the Wake-up Index that parks and revives waiting
//! jobs (§4.6).

pub mod executor;
pub mod wakeup;

pub use executor::{ExecutorError, Outcome, StepExecutor};
pub use wakeup::{ParkKey, WakeupIndex};
