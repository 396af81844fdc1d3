use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    Monthly,
    Yearly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Yearly => 1,
        }
    }
}

/// Parameters of one projection. Percentages are whole numbers, so `5.0`
/// means 5%.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub annual_increase_percent: f64,
    pub term_years: u32,
    pub annual_interest_rate_percent: f64,
    pub compounding_frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub period_index: u32,
    pub contributions_to_date: f64,
    pub total_value: f64,
}

impl ProjectionPoint {
    pub fn growth(&self) -> f64 {
        self.total_value - self.contributions_to_date
    }
}

/// Month-by-month snapshots in chronological order, one per elapsed month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectionSeries {
    points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    pub(crate) fn new(points: Vec<ProjectionPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionPoint> {
        self.points.iter()
    }

    /// One point per elapsed year, taken from the first month of each year.
    pub fn yearly_points(&self) -> Vec<ChartPoint> {
        self.points
            .iter()
            .filter(|point| point.period_index % 12 == 0)
            .map(|point| ChartPoint {
                period_index: point.period_index,
                year: point.period_index / 12 + 1,
                contributions_to_date: point.contributions_to_date,
                total_value: point.total_value,
                growth: point.growth(),
            })
            .collect()
    }

    pub fn summary(&self) -> ProjectionSummary {
        match self.points.last() {
            Some(point) => ProjectionSummary {
                final_value: point.total_value,
                total_contributions: point.contributions_to_date,
                total_growth: point.growth(),
            },
            None => ProjectionSummary {
                final_value: 0.0,
                total_contributions: 0.0,
                total_growth: 0.0,
            },
        }
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectionPoint;
    type IntoIter = std::slice::Iter<'a, ProjectionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub period_index: u32,
    pub year: u32,
    pub contributions_to_date: f64,
    pub total_value: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
}
