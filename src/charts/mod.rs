//! Charts module - Chart rendering

mod export;
pub mod layout;
mod plotter;
mod renderer;

pub use export::ReportExporter;
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
