//! Integration with the host shell.
//!
//! The editor core never opens dialogs itself; pickers are supplied by
//! whatever front end drives the session.

mod picker;

pub use picker::{FilePicker, PickError, PickResponse, QueuedPicker};
