// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod forms;
pub mod history;
pub mod model;
pub mod results;
pub mod select;
pub mod state;

pub use catalog::*;
pub use forms::*;
pub use history::*;
pub use model::*;
pub use results::*;
pub use select::*;
pub use state::*;
