//! Console collaborators
//!
//! The selection core talks to the outside world through three seams:
//! [`PickerSurface`](crate::workflow::PickerSurface),
//! [`PermissionRuntime`](crate::permission::PermissionRuntime) and
//! [`OutputWriter`]. This module holds the terminal-side pieces behind them:
//!
//! - **`UserInput`** - prompts (confirm, select, multi-select), implemented
//!   with dialoguer
//! - **`OutputWriter`** - user-visible notices with severity levels
//! - **`ConsolePermissions`** - permission dialog stand-in
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      SelectionController                │
//! │   (policy, dispatcher, reconciler)      │
//! └────────────────┬────────────────────────┘
//!                  │ Uses traits
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  PickerSurface / PermissionRuntime /    │
//! │  OutputWriter                           │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ Console       │  │ Test doubles      │
//! │ - Surface     │  │ - MockSurface     │
//! │ - Permissions │  │ - MockPermissions │
//! │ - Stdout      │  │ - StatusBarWriter │
//! └───────────────┘  └───────────────────┘
//! ```

pub mod input;
pub mod output;
pub mod permissions;

#[cfg(test)]
pub mod mock;

pub use input::{DialoguerInput, InputError, UserInput};
pub use output::{MessageLevel, OutputWriter, StatusBarWriter, StdoutWriter};
pub use permissions::ConsolePermissions;
