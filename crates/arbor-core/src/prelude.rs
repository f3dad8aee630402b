//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use arbor_core::prelude::*;
//! ```

pub use crate::{
    ActionContext, DispatchConfig, InvalidLottery, Layout, Lottery, Response, SessionConfig,
};
