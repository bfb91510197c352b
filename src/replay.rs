//! Recorded event traces: a JSON format and a driver that feeds them through
//! either front-end and reports what the host would have observed.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, PagerConfig};
use crate::input::{GestureEvent, NativeEvent, Notification};
use crate::native::NativePager;
use crate::pager::SwipeableViews;
use crate::transition::RenderState;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to decode trace: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("event {index}: {reason}")]
    Invalid { index: usize, reason: String },
}

/// Which front-end a trace was recorded against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    #[default]
    Touch,
    Native,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Touch { event: GestureEvent },
    Native { event: NativeEvent },
    /// Host changed the controlled index.
    Index { index: usize },
    /// Host changed the number of panels.
    Panels { count: usize },
    /// First paint reached the screen.
    Mounted,
    /// Host measured the settled panel using the trace's `heights`.
    Measure,
    /// One display frame of `dt` seconds.
    Frame { dt: f64 },
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub mode: TraceMode,
    pub panels: usize,
    /// Content height of each panel, in pixels.
    #[serde(default)]
    pub heights: Vec<f64>,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub notifications: Vec<Notification>,
    pub height_updates: Vec<f64>,
    pub index_latest: usize,
    pub index_current: f64,
    /// Last rendered frame (touch traces only).
    pub render: Option<RenderState>,
}

pub fn run(trace: &Trace, config: &PagerConfig) -> Result<ReplayReport, ReplayError> {
    config.validate()?;
    info!(
        "replaying {} events ({:?}, {} panels)",
        trace.events.len(),
        trace.mode,
        trace.panels
    );
    match trace.mode {
        TraceMode::Touch => run_touch(trace, config),
        TraceMode::Native => run_native(trace, config),
    }
}

fn run_touch(trace: &Trace, config: &PagerConfig) -> Result<ReplayReport, ReplayError> {
    let mut pager = SwipeableViews::new(config.clone(), trace.panels, Vec::new());
    let mut props = config.clone();
    let mut height_updates = Vec::new();

    for (index, event) in trace.events.iter().enumerate() {
        match event {
            TraceEvent::Touch { event } => pager.handle(*event),
            TraceEvent::Index { index } => {
                props.index = *index;
                pager.set_props(props.clone());
            }
            TraceEvent::Panels { count } => pager.set_panel_count(*count),
            TraceEvent::Mounted => pager.mark_mounted(),
            TraceEvent::Measure => {
                if let Some(h) = pager.sync_height(&trace.heights) {
                    height_updates.push(h);
                }
            }
            TraceEvent::Frame { dt } => {
                pager.advance(*dt);
            }
            TraceEvent::Teardown => pager.teardown(),
            TraceEvent::Native { .. } => {
                return Err(ReplayError::Invalid {
                    index,
                    reason: "native event in a touch trace".into(),
                });
            }
        }
    }

    let render = pager.render();
    let index_latest = pager.index_latest();
    let index_current = pager.index_current();
    let notifications = pager.into_listener();
    debug!("touch replay produced {} notifications", notifications.len());
    Ok(ReplayReport {
        notifications,
        height_updates,
        index_latest,
        index_current,
        render: Some(render),
    })
}

fn run_native(trace: &Trace, config: &PagerConfig) -> Result<ReplayReport, ReplayError> {
    let mut pager = NativePager::new(config, trace.panels, Vec::new());
    let mut props = config.clone();

    for (index, event) in trace.events.iter().enumerate() {
        match event {
            TraceEvent::Native { event } => pager.handle(*event),
            TraceEvent::Index { index } => {
                props.index = *index;
                pager.set_props(&props);
            }
            TraceEvent::Panels { count } => pager.set_panel_count(*count),
            TraceEvent::Teardown => pager.teardown(),
            TraceEvent::Mounted | TraceEvent::Measure | TraceEvent::Frame { .. } => {}
            TraceEvent::Touch { .. } => {
                return Err(ReplayError::Invalid {
                    index,
                    reason: "touch event in a native trace".into(),
                });
            }
        }
    }

    let index_latest = pager.index_latest();
    Ok(ReplayReport {
        notifications: pager.into_listener(),
        height_updates: Vec::new(),
        index_latest,
        index_current: index_latest as f64,
        render: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_touch_trace() {
        let trace = Trace::from_json(
            &json!({
                "panels": 3,
                "events": [
                    {"kind": "touch", "event": {"type": "start", "sample": {"x": 300.0, "y": 0.0}, "view_extent": 300.0}},
                    {"kind": "touch", "event": {"type": "move", "sample": {"x": 100.0, "y": 0.0}}},
                    {"kind": "touch", "event": {"type": "end"}},
                    {"kind": "frame", "dt": 0.016}
                ]
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(trace.mode, TraceMode::Touch);
        assert_eq!(trace.events.len(), 4);

        let report = run(&trace, &PagerConfig::default()).unwrap();
        assert_eq!(report.index_latest, 1);
        assert!(report
            .notifications
            .contains(&Notification::ChangeIndex { index: 1, from: 0 }));
    }

    #[test]
    fn rejects_mixed_trace() {
        let trace = Trace {
            mode: TraceMode::Touch,
            panels: 2,
            heights: Vec::new(),
            events: vec![TraceEvent::Native {
                event: NativeEvent::Layout { width: 100.0 },
            }],
        };
        let err = run(&trace, &PagerConfig::default()).unwrap_err();
        assert!(matches!(err, ReplayError::Invalid { index: 0, .. }));
    }

    #[test]
    fn invalid_config_is_reported() {
        let trace = Trace {
            mode: TraceMode::Native,
            panels: 2,
            heights: Vec::new(),
            events: Vec::new(),
        };
        let config = PagerConfig {
            threshold: f64::NAN,
            ..PagerConfig::default()
        };
        assert!(matches!(run(&trace, &config), Err(ReplayError::Config(_))));
    }

    #[test]
    fn bad_json_is_decode_error() {
        assert!(matches!(
            Trace::from_json("{\"panels\": \"three\"}"),
            Err(ReplayError::Decode(_))
        ));
    }
}
