// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query operations, one module per entity.

pub mod products;
pub mod sales;
pub mod summary;
