use chrono::Weekday;
use timetable_core::{weekday_column, Bucket};

use crate::types::LessonRecord;

/// Rows = buckets (Morning, Afternoon, Evening), columns = Monday..Sunday.
pub type GridMatrix = [[Option<String>; 7]; 3];

/// In-memory 3×7 projection of the lesson set.
///
/// Never persisted: it is rebuilt from [`LessonStore::list_all`] and then
/// mutated in place as lessons are added or removed.
///
/// [`LessonStore::list_all`]: crate::store::LessonStore::list_all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableGrid {
    cells: GridMatrix,
}

impl TimetableGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid by placing each record in order; later records win.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LessonRecord>) -> Self {
        let mut grid = Self::new();
        for rec in records {
            grid.place(rec);
        }
        grid
    }

    /// Write `name` into the cell, returning whatever it displaced.
    ///
    /// Placement is last-write-wins: an occupied cell is overwritten without
    /// error and the caller decides whether the displaced name matters.
    pub fn set(&mut self, bucket: Bucket, weekday: Weekday, name: impl Into<String>) -> Option<String> {
        self.cell_mut(bucket, weekday).replace(name.into())
    }

    /// Empty the cell. Clearing an empty cell is a no-op.
    pub fn clear(&mut self, bucket: Bucket, weekday: Weekday) -> Option<String> {
        self.cell_mut(bucket, weekday).take()
    }

    pub fn get(&self, bucket: Bucket, weekday: Weekday) -> Option<&str> {
        self.cells[bucket.row()][weekday_column(weekday)].as_deref()
    }

    /// Classify `record` and write its name into the matching cell.
    pub fn place(&mut self, record: &LessonRecord) -> Option<String> {
        let (bucket, weekday) = record.cell();
        self.set(bucket, weekday, record.name.clone())
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn render(&self) -> GridMatrix {
        self.cells.clone()
    }

    fn cell_mut(&mut self, bucket: Bucket, weekday: Weekday) -> &mut Option<String> {
        &mut self.cells[bucket.row()][weekday_column(weekday)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn lesson(name: &str, h: u32, y: i32, mo: u32, d: u32) -> LessonRecord {
        let t = NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let at = NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_time(t);
        LessonRecord::new(name, t, at).unwrap()
    }

    #[test]
    fn new_grid_has_21_empty_cells() {
        let grid = TimetableGrid::new();
        let m = grid.render();
        assert_eq!(m.len(), 3);
        assert!(m.iter().all(|row| row.len() == 7));
        assert!(m.iter().flatten().all(Option::is_none));
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn set_overwrites_and_returns_previous() {
        let mut grid = TimetableGrid::new();
        assert_eq!(grid.set(Bucket::Morning, Weekday::Mon, "Math"), None);
        assert_eq!(
            grid.set(Bucket::Morning, Weekday::Mon, "Physics"),
            Some("Math".to_string())
        );
        assert_eq!(grid.get(Bucket::Morning, Weekday::Mon), Some("Physics"));
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut grid = TimetableGrid::new();
        grid.set(Bucket::Evening, Weekday::Sun, "Art");
        assert_eq!(grid.clear(Bucket::Evening, Weekday::Sun), Some("Art".to_string()));
        assert_eq!(grid.clear(Bucket::Evening, Weekday::Sun), None);
        assert_eq!(grid.clear(Bucket::Morning, Weekday::Tue), None);
        assert_eq!(grid, TimetableGrid::new());
    }

    #[test]
    fn render_indexes_bucket_then_weekday() {
        let mut grid = TimetableGrid::new();
        grid.set(Bucket::Afternoon, Weekday::Fri, "History");
        let m = grid.render();
        assert_eq!(m[1][4].as_deref(), Some("History"));
    }

    #[test]
    fn from_records_places_each_lesson() {
        // 2024-06-03 Monday, 2024-06-08 Saturday.
        let records = vec![
            lesson("Math", 9, 2024, 6, 3),
            lesson("Music", 20, 2024, 6, 8),
            lesson("Biology", 9, 2024, 6, 10),
        ];
        let grid = TimetableGrid::from_records(&records);
        assert_eq!(grid.get(Bucket::Evening, Weekday::Sat), Some("Music"));
        // Same cell as Math one week later: last write wins.
        assert_eq!(grid.get(Bucket::Morning, Weekday::Mon), Some("Biology"));
        assert_eq!(grid.occupied(), 2);
    }
}
