// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod histogram;
pub mod log;
pub mod model;
pub mod reshape;
pub mod sort;
pub mod state;
pub mod threshold;

pub use histogram::*;
pub use log::*;
pub use model::*;
pub use reshape::*;
pub use sort::*;
pub use state::*;
pub use threshold::*;
