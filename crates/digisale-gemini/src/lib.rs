// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini client used by the daily sales digest.
//!
//! Thin wrapper around the generateContent REST endpoint: single-turn
//! prompts in, narrative text out, with one retry on transient failures.

pub mod client;
pub mod types;

pub use client::GeminiClient;
