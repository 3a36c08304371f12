use crate::stats::{DifficultyKey, SeriesKind, StatsTable};

/// One plotted point: categorical x position and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for SeriesPoint {
    fn from(v: (f64, f64)) -> Self {
        SeriesPoint { x: v.0, y: v.1 }
    }
}

impl From<SeriesPoint> for (f64, f64) {
    fn from(p: SeriesPoint) -> Self {
        (p.x, p.y)
    }
}

/// Sorted keys with the Max and Avg values aligned to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub keys: Vec<DifficultyKey>,
    pub max: Vec<f64>,
    pub avg: Vec<f64>,
}

impl ChartSeries {
    pub fn from_table(table: &StatsTable) -> Self {
        let mut keys = Vec::with_capacity(table.len());
        let mut max = Vec::with_capacity(table.len());
        let mut avg = Vec::with_capacity(table.len());

        for (key, entry) in table.iter() {
            keys.push(key.clone());
            max.push(entry.max);
            avg.push(entry.avg);
        }

        Self { keys, max, avg }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn values(&self, kind: SeriesKind) -> &[f64] {
        match kind {
            SeriesKind::Max => &self.max,
            SeriesKind::Avg => &self.avg,
        }
    }

    /// Points of one series with x set to the key's position in sorted order.
    pub fn points(&self, kind: SeriesKind) -> Vec<SeriesPoint> {
        self.values(kind)
            .iter()
            .enumerate()
            .map(|(i, v)| SeriesPoint::new(i as f64, *v))
            .collect()
    }

    /// All plotted values, both series
    pub fn all_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.max.iter().chain(self.avg.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsEntry;

    fn scenario_table() -> StatsTable {
        let mut table = StatsTable::default();
        table.insert(DifficultyKey::Number(1), StatsEntry::new(10.0, 5.0));
        table.insert(DifficultyKey::Number(3), StatsEntry::new(30.0, 15.0));
        table.insert(DifficultyKey::Number(2), StatsEntry::new(20.0, 12.0));
        table
    }

    #[test]
    fn series_follow_sorted_keys() {
        let series = ChartSeries::from_table(&scenario_table());
        assert_eq!(
            series.keys,
            vec![
                DifficultyKey::Number(1),
                DifficultyKey::Number(2),
                DifficultyKey::Number(3)
            ]
        );
        assert_eq!(series.max, vec![10.0, 20.0, 30.0]);
        assert_eq!(series.avg, vec![5.0, 12.0, 15.0]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn building_twice_gives_identical_series() {
        let table = scenario_table();
        assert_eq!(ChartSeries::from_table(&table), ChartSeries::from_table(&table));
    }

    #[test]
    fn points_use_categorical_positions() {
        let series = ChartSeries::from_table(&scenario_table());
        let tuples: Vec<(f64, f64)> = series
            .points(SeriesKind::Avg)
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(tuples, vec![(0.0, 5.0), (1.0, 12.0), (2.0, 15.0)]);
    }

    #[test]
    fn single_entry_gives_single_point() {
        let mut table = StatsTable::default();
        table.insert(DifficultyKey::Number(40), StatsEntry::new(3.0, 2.0));
        let series = ChartSeries::from_table(&table);
        assert_eq!(series.points(SeriesKind::Max), vec![SeriesPoint::new(0.0, 3.0)]);
    }

    #[test]
    fn point_tuple_conversions() {
        let p: SeriesPoint = (1.0, 2.0).into();
        assert_eq!(p, SeriesPoint::new(1.0, 2.0));
        let t: (f64, f64) = p.into();
        assert_eq!(t, (1.0, 2.0));
    }

    #[test]
    fn all_values_covers_both_series() {
        let series = ChartSeries::from_table(&scenario_table());
        assert_eq!(series.all_values().count(), 6);
        assert_eq!(series.all_values().fold(f64::MIN, f64::max), 30.0);
    }
}
