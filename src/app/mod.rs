mod report;
mod state;

pub use report::render_summary;
pub use state::App;
