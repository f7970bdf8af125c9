//! YAML-scripted scenarios replayed against the in-memory host.
//!
//! ```yaml
//! path: /src/main.rs
//! lines: 40
//! breakpoints: [2, 5, 9]
//! steps:
//!   - action: hover
//!     row: 7
//!   - action: click
//!     row: 7
//!   - action: insert_lines
//!     at: 0
//!     count: 2
//! ```

use super::editor::SimEditor;
use super::store::{ActionRecord, DispatchMode, SimActions, SimBreakpointStore};
use crate::controller::{BreakpointGutter, Collaborators};
use crate::host::{Gutter, PointerEvent, PointerTarget, Row};
use crate::oneshot::OneShot;
use breakpoint_gutter_config::{ConfigError, GutterConfig};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Move the pointer over `row` of the breakpoint gutter.
    Hover { row: Row },
    /// Move the pointer out of the gutter.
    Leave,
    /// Click `row` of the breakpoint gutter.
    Click { row: Row },
    /// Click the inline icon on `row`; ignored by the controller.
    ClickIcon { row: Row },
    /// Click `row` of the line-number gutter.
    ClickLineNumber { row: Row },
    InsertLines { at: Row, count: Row },
    DeleteLines { start: Row, end: Row },
    /// Add a breakpoint directly in the store, bypassing the controller.
    AddBreakpoint { row: Row },
    /// Remove a breakpoint directly in the store, bypassing the controller.
    RemoveBreakpoint { row: Row },
    /// Destroy the breakpoint gutter from the host side.
    DestroyGutter,
    /// Close the editor from the host side.
    CloseEditor,
    /// Dispose the controller.
    Dispose,
}

/// A buffer, its initial breakpoints and the steps to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Path of the buffer; omit it to simulate an unsaved buffer.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_lines")]
    pub lines: Row,
    #[serde(default)]
    pub breakpoints: Vec<Row>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_lines() -> Row {
    100
}

/// State observed after the last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub committed_rows: BTreeSet<Row>,
    pub store_rows: BTreeSet<Row>,
    pub actions: Vec<ActionRecord>,
    pub shadow_row: Option<Row>,
    pub gutter_visible: bool,
    pub owner_notified: bool,
    pub markers_created: u64,
    pub markers_destroyed: u64,
}

impl Scenario {
    /// Parse a scenario from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml_ng::from_str(&contents).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the scenario at `path` and replay it with the config at
    /// `config_path`, or the default config location when `None`.
    pub fn run_file(
        path: &Path,
        config_path: Option<&Path>,
    ) -> Result<ScenarioReport, ScenarioError> {
        let config = match config_path {
            Some(config_path) => GutterConfig::load_from(config_path)?,
            None => GutterConfig::load()?,
        };
        Ok(Self::load(path)?.run(config))
    }

    /// Replay the scenario with `config` and report the final state.
    pub fn run(&self, config: GutterConfig) -> ScenarioReport {
        let editor = SimEditor::new(self.path.clone(), self.lines);
        let store = SimBreakpointStore::new();
        if let Some(path) = &self.path {
            store.set_rows(path, self.breakpoints.iter().copied());
        }
        let actions = SimActions::new(Rc::clone(&store), DispatchMode::Immediate);

        let notified = Rc::new(Cell::new(false));
        let flag = Rc::clone(&notified);
        let gutter_name = config.gutter_name.clone();
        let mut controller = BreakpointGutter::new(
            Collaborators {
                editor: editor.clone(),
                store: store.clone(),
                actions: actions.clone(),
            },
            config,
            OneShot::new(move || flag.set(true)),
        );
        let gutter = editor.gutter_named(&gutter_name);

        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("Step {}: {:?}", index + 1, step);
            match *step {
                Step::Hover { row } => {
                    if let Some(gutter) = &gutter {
                        gutter.emit_pointer(PointerEvent::moved(editor.position_of_row(row)));
                    }
                }
                Step::Leave => {
                    if let Some(gutter) = &gutter {
                        gutter.emit_pointer(PointerEvent::left());
                    }
                }
                Step::Click { row } | Step::ClickIcon { row } => {
                    let target = if matches!(step, Step::ClickIcon { .. }) {
                        PointerTarget::InlineIcon
                    } else {
                        PointerTarget::Gutter
                    };
                    if let Some(gutter) = &gutter {
                        gutter.emit_pointer(PointerEvent::clicked(
                            editor.position_of_row(row),
                            target,
                        ));
                    }
                }
                Step::ClickLineNumber { row } => {
                    if let Some(line_numbers) = editor.line_number_gutter() {
                        line_numbers.emit_pointer(PointerEvent::clicked(
                            editor.position_of_row(row),
                            PointerTarget::Gutter,
                        ));
                    }
                }
                Step::InsertLines { at, count } => editor.insert_lines(at, count),
                Step::DeleteLines { start, end } => editor.delete_lines(start, end),
                Step::AddBreakpoint { row } => {
                    if let Some(path) = &self.path {
                        store.add(path, row);
                    }
                }
                Step::RemoveBreakpoint { row } => {
                    if let Some(path) = &self.path {
                        store.remove(path, row);
                    }
                }
                Step::DestroyGutter => {
                    if let Some(gutter) = &gutter {
                        gutter.destroy();
                    }
                }
                Step::CloseEditor => editor.destroy(),
                Step::Dispose => controller.dispose(),
            }
            controller.process_pending_events();
        }

        ScenarioReport {
            committed_rows: controller.committed_rows(),
            store_rows: self
                .path
                .as_deref()
                .map(|path| store.rows(path))
                .unwrap_or_default(),
            actions: actions.log(),
            shadow_row: controller.shadow_row(),
            gutter_visible: gutter
                .as_ref()
                .is_some_and(|g| !g.is_destroyed() && g.is_visible()),
            owner_notified: notified.get(),
            markers_created: controller.anchors().created_total(),
            markers_destroyed: controller.anchors().destroyed_total(),
        }
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "committed rows: {:?}", self.committed_rows)?;
        writeln!(f, "store rows:     {:?}", self.store_rows)?;
        match self.shadow_row {
            Some(row) => writeln!(f, "shadow row:     {}", row)?,
            None => writeln!(f, "shadow row:     none")?,
        }
        writeln!(f, "gutter visible: {}", self.gutter_visible)?;
        writeln!(f, "owner notified: {}", self.owner_notified)?;
        writeln!(
            f,
            "markers:        {} created, {} destroyed",
            self.markers_created, self.markers_destroyed
        )?;
        writeln!(f, "actions:")?;
        if self.actions.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for action in &self.actions {
            writeln!(f, "  {}", action)?;
        }
        Ok(())
    }
}
