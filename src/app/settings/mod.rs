// SPDX-License-Identifier: GPL-3.0-only

//! Settings UI module
//!
//! This module handles the settings drawer: appearance and gallery options.

pub mod view;
