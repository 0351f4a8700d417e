use crate::presentation::ports::capabilities::{ChartHandle, ChartRenderer, RadarChart};
use crate::presentation::slides::skills::RADAR_CANVAS_ID;
use crate::report::application::domain::entities::{Category, StatMap};

pub const RADAR_COLOR: &str = "#A61C26";
pub const RADAR_MIN: f64 = 0.0;
pub const RADAR_MAX: f64 = 100.0;

fn radar_label(category: Category) -> &'static str {
    match category {
        Category::Teaching => "支教",
        Category::Care => "社会关怀",
        Category::Eco => "环保",
        Category::Mind => "心之旅",
        Category::Others => "其他",
    }
}

/// The five categories in canonical order on a fixed 0–100 scale.
pub fn radar_chart(stats: &StatMap) -> RadarChart {
    RadarChart {
        labels: Category::ALL.iter().map(|c| radar_label(*c).to_string()).collect(),
        values: Category::ALL.iter().map(|c| stats.get(*c)).collect(),
        suggested_min: RADAR_MIN,
        suggested_max: RADAR_MAX,
        color: RADAR_COLOR.to_string(),
    }
}

/// Keeps at most one live chart: every render destroys the previous one.
#[derive(Debug, Default)]
pub struct RadarAdapter {
    current: Option<ChartHandle>,
}

impl RadarAdapter {
    pub fn render(&mut self, charts: &dyn ChartRenderer, stats: &StatMap) {
        if let Some(previous) = self.current.take() {
            charts.destroy(previous);
        }
        self.current = Some(charts.create_radar(RADAR_CANVAS_ID, &radar_chart(stats)));
    }

    pub fn current(&self) -> Option<ChartHandle> {
        self.current
    }
}
