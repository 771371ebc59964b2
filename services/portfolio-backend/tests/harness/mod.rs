// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for admin login brute-force simulation.
//!
//! Attacks run against the throttle and session registry directly with a
//! manual clock, so block windows elapse without sleeping.

pub mod attacks;
pub mod generators;
pub mod metrics;
