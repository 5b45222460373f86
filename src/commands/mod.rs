// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod reports;
pub mod budgets;
pub mod categories;
pub mod currencies;
pub mod recurring;
pub mod profile;
pub mod assistant;
pub mod importer;
pub mod exporter;
