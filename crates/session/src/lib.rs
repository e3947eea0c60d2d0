use std::sync::Arc;

use tracing::debug;

use dataset::{sample, Dataset};
use shared::{
    domain::{DisplayColor, SliderLevel},
    error::{ApiException, ErrorCode},
    protocol::{SerializedSample, ServerEvent},
};
use views::{build_download, build_plot, build_table};

/// Holds the most recent sample in serialized form. Single writer per
/// session; every write carries a monotonic version so a stale in-flight
/// computation can never overwrite a newer sample.
#[derive(Debug, Default)]
pub struct SampleStore {
    version: u64,
    value: Option<SerializedSample>,
}

impl SampleStore {
    /// Replaces the stored sample wholesale. Returns `false` and discards
    /// the write when `version` is not newer than the stored one.
    pub fn set(&mut self, version: u64, value: SerializedSample) -> bool {
        if version <= self.version {
            return false;
        }
        self.version = version;
        self.value = Some(value);
        true
    }

    /// `None` until the first successful `set`: "no data yet", not an error.
    pub fn get(&self) -> Option<&SerializedSample> {
        self.value.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// User-facing inputs the control surface reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    SliderChanged { level: u8 },
    ColorChanged { color: DisplayColor },
    DownloadClicked,
}

/// One step in the evaluation of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Resample,
    UpdateLabel,
    RebuildPlot,
    RebuildTable,
    BuildDownload,
}

/// The input→action dependency graph, evaluated in the listed order. The
/// sample is written before anything reads it; a color change never reaches
/// the sampler; the download reads the store passively.
pub fn actions_for(event: InputEvent) -> &'static [Action] {
    match event {
        InputEvent::SliderChanged { .. } => &[
            Action::Resample,
            Action::UpdateLabel,
            Action::RebuildPlot,
            Action::RebuildTable,
        ],
        InputEvent::ColorChanged { .. } => &[Action::RebuildPlot],
        InputEvent::DownloadClicked => &[Action::BuildDownload],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No sample drawn yet; every projection except the slider label is a
    /// no-op.
    Uninitialized,
    Ready,
}

/// Per-session control surface: owns the sample store and the currently
/// selected inputs, and turns input events into server events. Events are
/// handled one at a time per session.
pub struct Session {
    dataset: Arc<Dataset>,
    store: SampleStore,
    level: SliderLevel,
    color: DisplayColor,
    next_version: u64,
    resamples: u64,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            store: SampleStore::default(),
            level: SliderLevel::default(),
            color: DisplayColor::default(),
            next_version: 0,
            resamples: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.store.get().is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Uninitialized
        }
    }

    /// Number of samples drawn so far.
    pub fn resamples(&self) -> u64 {
        self.resamples
    }

    pub fn store_version(&self) -> u64 {
        self.store.version()
    }

    /// Evaluates the event's actions in graph order and returns the view
    /// updates to push. A rejected input leaves the session untouched; a
    /// stale store write aborts the remaining actions so views never repaint
    /// from an out-of-date sample.
    pub fn handle(&mut self, event: InputEvent) -> Result<Vec<ServerEvent>, ApiException> {
        match event {
            InputEvent::SliderChanged { level } => {
                self.level = SliderLevel::new(level).ok_or_else(|| {
                    ApiException::new(
                        ErrorCode::InvalidParameter,
                        format!("slider level must be 0..={}, got {level}", SliderLevel::MAX),
                    )
                })?;
            }
            InputEvent::ColorChanged { color } => self.color = color,
            InputEvent::DownloadClicked => {}
        }

        let mut outputs = Vec::new();
        for action in actions_for(event) {
            match action {
                Action::Resample => {
                    if !self.resample()? {
                        debug!(version = self.store.version(), "stale sample discarded");
                        return Ok(Vec::new());
                    }
                }
                Action::UpdateLabel => outputs.push(self.label_event()),
                Action::RebuildPlot => outputs.extend(self.plot_event()),
                Action::RebuildTable => outputs.extend(self.table_event()),
                Action::BuildDownload => outputs.push(self.download_event()?),
            }
        }

        Ok(outputs)
    }

    fn resample(&mut self) -> Result<bool, ApiException> {
        let drawn = sample(&self.dataset, self.level.fraction())?;
        self.resamples += 1;
        let version = self.next_version + 1;
        self.next_version = version;
        let stored = self
            .store
            .set(version, SerializedSample::from_records(&drawn));
        if stored {
            debug!(
                level = self.level.value(),
                rows = drawn.len(),
                version,
                "sample refreshed"
            );
        }
        Ok(stored)
    }

    fn label_event(&self) -> ServerEvent {
        let fraction = self.level.fraction();
        let total = self.dataset.len();
        // The label row count floors; the sample size itself rounds to
        // nearest.
        let sampled = (fraction * total as f64).floor() as u64;
        ServerEvent::SampleLabelUpdated {
            text: format!(
                "Sampled {sampled} rows of {total} rows ({:.1}%)",
                fraction * 100.0
            ),
        }
    }

    fn plot_event(&self) -> Option<ServerEvent> {
        let serialized = self.store.get()?;
        build_plot(serialized, self.level.fraction(), self.color)
            .map(|plot| ServerEvent::PlotUpdated { plot })
    }

    fn table_event(&self) -> Option<ServerEvent> {
        let serialized = self.store.get()?;
        build_table(serialized).map(|table| ServerEvent::TableUpdated { table })
    }

    fn download_event(&self) -> Result<ServerEvent, ApiException> {
        let serialized = self.store.get().ok_or_else(|| {
            ApiException::new(
                ErrorCode::InvalidState,
                "no sample has been generated yet",
            )
        })?;
        Ok(ServerEvent::DownloadReady {
            file: build_download(serialized),
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
