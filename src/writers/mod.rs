pub mod panel_writer;

pub use panel_writer::PanelWriter;
