//! Operation logging for optimizer persistence
//!
//! Store calls are bracketed by `log_op_start!` and `log_op_end!` (or
//! `log_op_error!`), all on the `optimizer` target. Binaries call
//! [`init`] once; tests read events back through [`init_test_capture`].

pub mod init;
pub mod macros;
pub mod schema;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
