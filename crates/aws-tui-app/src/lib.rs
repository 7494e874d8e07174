// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod forms;
pub mod keys;
pub mod model;
pub mod settings;
pub mod state;
pub mod table;
pub mod tree;

pub use catalog::*;
pub use forms::*;
pub use keys::*;
pub use model::*;
pub use settings::*;
pub use state::*;
pub use table::*;
pub use tree::*;
