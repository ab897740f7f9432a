//! Adapters at the edges of the till: the card reader's serial line and the
//! operator console.

pub mod console;
pub mod serial;
