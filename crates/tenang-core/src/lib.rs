//! tenang-core
//!
//! Pure domain types for the Tenang screening system: symptom definitions,
//! threshold ranges, answers, and screening results. No scoring logic and
//! no persistence — this is the shared vocabulary of the system.

pub mod error;
pub mod models;
