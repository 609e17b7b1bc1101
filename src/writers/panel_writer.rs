use std::path::Path;

use crate::error::Result;
use crate::render::DashboardPanels;

/// Serializes a rendered panel set to JSON.
pub struct PanelWriter {
    pretty: bool,
}

impl PanelWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn to_json_string(&self, panels: &DashboardPanels) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(panels)?
        } else {
            serde_json::to_string(panels)?
        };
        Ok(json)
    }

    pub fn write_to_file(&self, panels: &DashboardPanels, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json_string(panels)?)?;
        Ok(())
    }
}

impl Default for PanelWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::filters::FilterSet;
    use crate::models::{Column, Reading};
    use crate::render::{render_dashboard, ChartSelection};
    use crate::session::Dataset;
    use tempfile::TempDir;

    fn panels() -> DashboardPanels {
        let dataset = Dataset::new(
            vec![Reading {
                station: "Dongsi".to_string(),
                pm25: Some(12.0),
                ..Default::default()
            }],
            vec![],
        );
        let selection = ChartSelection {
            histogram: Some(Column::Pm25),
            ..Default::default()
        };
        render_dashboard(
            &dataset,
            &FilterSet::default(),
            &selection,
            &DashboardConfig::default(),
        )
    }

    #[test]
    fn test_write_to_file_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("panels.json");

        let writer = PanelWriter::new();
        writer.write_to_file(&panels(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["filtered_rows"], 1);
        assert_eq!(json["histogram"]["status"], "rendered");
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let writer = PanelWriter::with_pretty(false);
        let json = writer.to_json_string(&panels()).unwrap();
        assert!(!json.contains('\n'));
    }
}
