//! Application layer: the debit engine and the till session that drives it.
//!
//! `Terminal` owns the reader handle and the engine for the lifetime of a
//! session and runs each transaction cycle to completion before the next.

pub mod engine;
pub mod session;
