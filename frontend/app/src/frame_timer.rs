use std::collections::BTreeMap;

const SHORT_HISTORY_LENGTH: usize = 60;
const LONG_HISTORY_LENGTH: usize = 300;

#[derive(Default)]
struct Section {
    start_time: Option<f64>,
    // Newest first.
    elapsed_times: Vec<f64>,
}

/// Wall-clock timings for named parts of a frame, in seconds.
#[derive(Default)]
pub struct FrameTimer {
    sections: BTreeMap<&'static str, Section>,
}

impl FrameTimer {
    pub fn start(&mut self, name: &'static str, now: f64) {
        self.sections.entry(name).or_default().start_time = Some(now);
    }

    pub fn end(&mut self, name: &'static str, now: f64) {
        let section = self.sections.entry(name).or_default();
        if let Some(start_time) = section.start_time.take() {
            section.elapsed_times.insert(0, now - start_time);
            section.elapsed_times.truncate(LONG_HISTORY_LENGTH);
        }
    }

    pub fn get_names(&self) -> Vec<&'static str> {
        self.sections.keys().copied().collect()
    }

    // Returns worst latency in (last frame, short history, long history).
    pub fn get(&self, name: &str) -> (f64, f64, f64) {
        let v = match self.sections.get(name) {
            Some(section) if !section.elapsed_times.is_empty() => &section.elapsed_times,
            _ => return (0.0, 0.0, 0.0),
        };
        let max = |xs: &[f64]| xs.iter().fold(f64::NEG_INFINITY, |a, &b| f64::max(a, b));
        (
            v[0],
            max(&v[..v.len().min(SHORT_HISTORY_LENGTH)]),
            max(v),
        )
    }
}
