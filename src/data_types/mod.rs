pub mod axis;
pub mod data;
pub mod datasource;
pub mod geometry;
pub mod plot_configs;
pub mod state;

pub use axis::*;
pub use data::*;
pub use datasource::*;
pub use geometry::*;
pub use plot_configs::*;
pub use state::*;
