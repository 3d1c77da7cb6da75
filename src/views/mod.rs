//! The three linked views. Each one is built once per dataset and renders
//! pure [`Scene`](crate::scene::Scene)s from explicit view state:
//!
//! ```text
//!  Dataset ──► BarChart ───────────────────────────► Scene
//!     │
//!     ├──────► ScatterPlot + ScatterState (brush) ──► Scene
//!     │                    │ selected records
//!     │                    ▼
//!     └──────► ParallelCoords + ParallelState ──────► Scene
//! ```

pub mod bar_chart;
pub mod brush;
pub mod fade;
pub mod parallel;
pub mod scatter;
