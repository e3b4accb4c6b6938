// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod currency;
pub mod db;
pub mod events;
pub mod models;
pub mod utils;
