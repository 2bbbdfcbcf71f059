// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by the record store, entry forms and input parsing.
#[derive(Debug, Error)]
pub enum ShiftbookError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ShiftbookError>;
