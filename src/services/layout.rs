// Grid arrangement of report cards

use crate::models::{CardPlacement, CardSize};

/// Columns of the row-packing grid used once any card is full width
pub const PACKED_COLUMNS: u32 = 4;

/// Place cards on a grid, keeping their order.
///
/// When any card is `full`, cards are packed row by row into four columns.
/// Otherwise every card spans one column of a square-ish grid with
/// `ceil(sqrt(n))` columns. Returns the column count and the placements.
pub fn arrange(cards: &[(i64, CardSize)]) -> (u32, Vec<CardPlacement>) {
    if cards.iter().any(|(_, size)| *size == CardSize::Full) {
        (PACKED_COLUMNS, pack_rows(cards))
    } else {
        let columns = square_columns(cards.len());
        (columns, square_grid(cards, columns))
    }
}

fn pack_rows(cards: &[(i64, CardSize)]) -> Vec<CardPlacement> {
    let mut placements = Vec::with_capacity(cards.len());
    let (mut row, mut column) = (1u32, 1u32);

    for (card_id, size) in cards {
        let span = size.span();
        if column + span - 1 > PACKED_COLUMNS {
            row += 1;
            column = 1;
        }
        placements.push(CardPlacement { card_id: *card_id, size: *size, row, column, span });
        column += span;
        if column > PACKED_COLUMNS {
            row += 1;
            column = 1;
        }
    }

    placements
}

fn square_columns(count: usize) -> u32 {
    let mut columns = 1u32;
    while (columns as usize) * (columns as usize) < count {
        columns += 1;
    }
    columns
}

fn square_grid(cards: &[(i64, CardSize)], columns: u32) -> Vec<CardPlacement> {
    cards
        .iter()
        .zip(0u32..)
        .map(|((card_id, size), index)| CardPlacement {
            card_id: *card_id,
            size: *size,
            row: index / columns + 1,
            column: index % columns + 1,
            span: 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(placements: &[CardPlacement]) -> Vec<(u32, u32, u32)> {
        placements.iter().map(|p| (p.row, p.column, p.span)).collect()
    }

    #[test]
    fn test_square_grid_columns() {
        assert_eq!(square_columns(0), 1);
        assert_eq!(square_columns(1), 1);
        assert_eq!(square_columns(4), 2);
        assert_eq!(square_columns(5), 3);
        assert_eq!(square_columns(10), 4);
    }

    #[test]
    fn test_square_grid_is_row_major() {
        let cards: Vec<(i64, CardSize)> =
            vec![(1, CardSize::Normal), (2, CardSize::Half), (3, CardSize::Normal)];
        let (columns, placements) = arrange(&cards);
        assert_eq!(columns, 2);
        assert_eq!(positions(&placements), vec![(1, 1, 1), (1, 2, 1), (2, 1, 1)]);
    }

    #[test]
    fn test_full_card_switches_to_row_packing() {
        let cards = vec![
            (1, CardSize::Normal),
            (2, CardSize::Half),
            (3, CardSize::Half),
            (4, CardSize::Full),
            (5, CardSize::Normal),
        ];
        let (columns, placements) = arrange(&cards);
        assert_eq!(columns, 4);
        assert_eq!(
            positions(&placements),
            vec![(1, 1, 1), (1, 2, 2), (2, 1, 2), (3, 1, 4), (4, 1, 1)]
        );
    }

    #[test]
    fn test_row_wraps_after_filling() {
        let cards = vec![(1, CardSize::Half), (2, CardSize::Half), (3, CardSize::Full)];
        let (_, placements) = arrange(&cards);
        assert_eq!(positions(&placements), vec![(1, 1, 2), (1, 3, 2), (2, 1, 4)]);
    }

    #[test]
    fn test_empty_report() {
        let (columns, placements) = arrange(&[]);
        assert_eq!(columns, 1);
        assert!(placements.is_empty());
    }
}
