// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devquiz`: command-line front door to the daily developer quiz.

pub mod command;
pub mod config;
pub mod navigator;
