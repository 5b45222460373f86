// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod ai;
pub mod charts;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod registry;
pub mod state;
pub mod utils;
