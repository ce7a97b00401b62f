//! Conversion of the aggregated scores to rows of cells, and the addressing of
//! these rows in a worksheet.

use log::debug;
use std::fmt::Display;

use crate::config::*;
use crate::AggregationTable;

/// Spreadsheet name of a column: 1 is `A`, 26 is `Z`, 27 is `AA`.
///
/// Column 0 does not exist and maps to the empty string.
pub fn column_name(col: u32) -> String {
    let mut n = col;
    let mut letters: Vec<char> = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// The inverse of [column_name]. Accepts lowercase letters.
pub fn column_number(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n)
}

/// A rectangular block of cells. Rows and columns are 1-based.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Region {
    pub start_row: u32,
    pub start_col: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// The region holding a single row of `column_count` cells, starting at the first column.
    pub fn for_row(row: u32, column_count: usize) -> Region {
        Region {
            start_row: row,
            start_col: 1,
            width: column_count as u32,
            height: 1,
        }
    }

    pub fn end_row(&self) -> u32 {
        self.start_row + self.height.saturating_sub(1)
    }

    pub fn end_col(&self) -> u32 {
        self.start_col + self.width.saturating_sub(1)
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.width > 0
            && self.height > 0
            && (self.start_row..=self.end_row()).contains(&row)
            && (self.start_col..=self.end_col()).contains(&col)
    }

    /// A1 notation, for instance `A2:H2`.
    pub fn to_a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_name(self.start_col),
            self.start_row,
            column_name(self.end_col()),
            self.end_row()
        )
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// The result table, ready to be written.
///
/// The header goes to the first row of the worksheet, the data rows follow.
#[derive(PartialEq, Debug, Clone)]
pub struct OutputGrid {
    pub header: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl OutputGrid {
    pub fn header_region(&self) -> Region {
        Region::for_row(1, self.header.len())
    }

    /// The region of the data row at `idx` (0-based) in the list of rows.
    pub fn row_region(&self, idx: usize) -> Option<Region> {
        self.rows
            .get(idx)
            .map(|row| Region::for_row((idx + 2) as u32, row.len()))
    }

    /// Number of worksheet rows covered, header included.
    pub fn height(&self) -> usize {
        self.rows.len() + 1
    }

    /// Number of worksheet columns covered by the widest row.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Lays out the table: one row per performer, in the order of the table.
///
/// The category names of the header are the ones of the first performer. The
/// other performers are not checked against them, see
/// [AggregationTable::check_consistent_categories].
pub fn serialize_table(
    table: &AggregationTable,
    index_label: &str,
    performer_label: &str,
) -> OutputGrid {
    let mut header: Vec<CellValue> = vec![index_label.into(), performer_label.into()];
    header.extend(table.first_categories().into_iter().map(CellValue::from));

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, (performer, scores)) in table.iter().enumerate() {
        let mut row: Vec<CellValue> =
            vec![CellValue::Int((idx + 1) as i64), performer.as_str().into()];
        row.extend(scores.values().map(|s| CellValue::from(*s)));
        debug!("serialize_table: row {}: {:?}", idx + 1, row);
        rows.push(row);
    }
    OutputGrid { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "");
        assert_eq!(column_name(1), "A");
        assert_eq!(column_name(8), "H");
        assert_eq!(column_name(26), "Z");
        assert_eq!(column_name(27), "AA");
        assert_eq!(column_name(52), "AZ");
        assert_eq!(column_name(53), "BA");
        assert_eq!(column_name(702), "ZZ");
        assert_eq!(column_name(703), "AAA");
    }

    #[test]
    fn column_numbers() {
        for n in [1, 2, 25, 26, 27, 100, 702, 703, 16384] {
            assert_eq!(column_number(&column_name(n)), Some(n));
        }
        assert_eq!(column_number("ab"), Some(28));
        assert_eq!(column_number(""), None);
        assert_eq!(column_number("A1"), None);
    }

    #[test]
    fn row_regions() {
        let r = Region::for_row(2, 8);
        assert_eq!(r.to_a1(), "A2:H2");
        assert_eq!(r.end_col(), 8);
        assert!(r.contains(2, 1));
        assert!(r.contains(2, 8));
        assert!(!r.contains(2, 9));
        assert!(!r.contains(3, 1));
        assert_eq!(Region::for_row(1, 30).to_a1(), "A1:AD1");
    }

    #[test]
    fn serializes_in_table_order() {
        let mut table = AggregationTable::new();
        table.add("Bob", "Song", Score::Int(3));
        table.add("Alice", "Song", Score::Int(5));
        table.add("Bob", "Staging", Score::Real(1.5));
        table.add("Alice", "Staging", Score::Int(2));

        let grid = serialize_table(&table, "No.", "Performer");
        assert_eq!(
            grid.header,
            vec![
                CellValue::from("No."),
                CellValue::from("Performer"),
                CellValue::from("Song"),
                CellValue::from("Staging")
            ]
        );
        assert_eq!(
            grid.rows,
            vec![
                vec![
                    CellValue::Int(1),
                    CellValue::from("Bob"),
                    CellValue::Int(3),
                    CellValue::Float(1.5)
                ],
                vec![
                    CellValue::Int(2),
                    CellValue::from("Alice"),
                    CellValue::Int(5),
                    CellValue::Int(2)
                ],
            ]
        );
        assert_eq!(grid.header_region().to_a1(), "A1:D1");
        assert_eq!(grid.row_region(0).unwrap().to_a1(), "A2:D2");
        assert_eq!(grid.row_region(1).unwrap().to_a1(), "A3:D3");
        assert_eq!(grid.row_region(2), None);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
    }

    #[test]
    fn header_follows_first_performer() {
        let mut table = AggregationTable::new();
        table.add("Alice", "Song", Score::Int(1));
        table.add("Bob", "Staging", Score::Int(1));
        table.add("Bob", "Song", Score::Int(1));
        table.add("Bob", "Outfit", Score::Int(1));

        let grid = serialize_table(&table, "No.", "Performer");
        assert_eq!(grid.header.len(), 3);
        assert_eq!(grid.rows[0].len(), 3);
        assert_eq!(grid.rows[1].len(), 5);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.row_region(1).unwrap().to_a1(), "A3:E3");
    }

    #[test]
    fn empty_table() {
        let grid = serialize_table(&AggregationTable::new(), "No.", "Izvajalec");
        assert_eq!(
            grid.header,
            vec![CellValue::from("No."), CellValue::from("Izvajalec")]
        );
        assert!(grid.rows.is_empty());
        assert_eq!(grid.header_region().to_a1(), "A1:B1");
    }
}
