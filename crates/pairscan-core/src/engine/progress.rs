/// Events emitted while building indices, scanning and checking alignments.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    IndexBuildStart { total_structures: u64 },
    StructureIndexed { name: String, entries: usize },
    IndexBuildFinish { cells: usize, entries: usize },

    ScanStart { total_cells: u64 },
    CellScanned,
    ScanFinish { matches: usize },

    CheckStart { total_positions: u64 },
    PositionChecked,
    CheckFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback; silent without one.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn silent_reporter_drops_events() {
        ProgressReporter::new().report(Progress::CellScanned);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        reporter.report(Progress::ScanStart { total_cells: 2 });
        reporter.message("halfway");
        reporter.report(Progress::ScanFinish { matches: 0 });
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Progress::ScanStart { total_cells: 2 },
                Progress::Message("halfway".to_string()),
                Progress::ScanFinish { matches: 0 },
            ]
        );
    }
}
