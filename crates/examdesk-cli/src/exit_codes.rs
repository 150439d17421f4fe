//! Process exit codes.
//! These codes are part of the public contract; scripts may branch on them.

pub const SUCCESS: i32 = 0;
pub const INPUT_ERROR: i32 = 1; // Invalid draft, unknown exam, rejected request or file
pub const CONFIG_ERROR: i32 = 2; // Bad configuration or credentials
pub const BACKEND_ERROR: i32 = 3; // Network failure or server error
