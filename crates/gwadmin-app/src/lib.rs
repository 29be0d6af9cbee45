// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod inputs;
pub mod listview;
pub mod model;
pub mod state;
pub mod styles;
pub mod table;

pub use ids::*;
pub use inputs::*;
pub use listview::*;
pub use model::*;
pub use state::*;
pub use styles::*;
pub use table::*;
