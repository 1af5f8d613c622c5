//! Plain-text map and spawn list parsing.
//!
//! A map is one row of whitespace-separated tokens per line. Integer tokens
//! are tile codes; single letters put a sprite on an open tile. Anything
//! else is logged and dropped, which usually leaves the row short and gets
//! the level rejected when the grid is built.
use std::collections::BTreeSet;

use raycast_core::{GridCoord, Placement, PlacementKind, PickupKind, Vec2};

/// Letters a level accepts as scenery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecorationTable {
    letters: BTreeSet<char>,
}

impl DecorationTable {
    pub fn new(letters: impl IntoIterator<Item = char>) -> Self {
        Self {
            letters: letters.into_iter().collect(),
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Tiles and sprite placements read from a map file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapLayout {
    pub rows: Vec<Vec<u16>>,
    pub placements: Vec<Placement>,
}

enum Token {
    Tile(u16),
    Sprite(PlacementKind),
}

fn classify(token: &str, decorations: &DecorationTable) -> Option<Token> {
    let mut chars = token.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            if let Some(pickup) = PickupKind::from_map_letter(letter) {
                return Some(Token::Sprite(PlacementKind::Pickup(pickup)));
            }
            return decorations
                .contains(letter)
                .then_some(Token::Sprite(PlacementKind::Decoration(letter)));
        }
    }
    token.parse().ok().map(Token::Tile)
}

/// Parses map text. Trailing blank lines are ignored; blank lines in the
/// middle are kept as empty rows so the grid check can report them.
pub fn parse_map(text: &str, decorations: &DecorationTable) -> MapLayout {
    let lines: Vec<&str> = text.lines().collect();
    let used = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);

    let mut layout = MapLayout::default();
    for (y, line) in lines[..used].iter().enumerate() {
        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let cell = GridCoord::new(row.len() as i32, y as i32);
            match classify(token, decorations) {
                Some(Token::Tile(code)) => row.push(code),
                Some(Token::Sprite(kind)) => {
                    layout.placements.push(Placement { cell, kind });
                    row.push(0);
                }
                None => tracing::warn!(row = y, token, "skipping malformed map token"),
            }
        }
        layout.rows.push(row);
    }
    layout
}

/// Parses an enemy spawn list: one `x y` pair per line, `#` starts a comment line.
pub fn parse_spawns(text: &str) -> Vec<Vec2> {
    let mut spawns = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace().map(str::parse::<f32>);
        match (fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y))) if x.is_finite() && y.is_finite() => {
                spawns.push(Vec2::new(x, y));
            }
            _ => tracing::warn!(line = number + 1, entry = line, "skipping invalid enemy entry"),
        }
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use raycast_core::{KeyColor, WeaponKind};

    #[test]
    fn letters_become_open_tiles_with_sprites() {
        let text = "1 1 1 1\n1 G P 1\n1 T 0 1\n1 1 1 1\n\n\n";
        let layout = parse_map(text, &DecorationTable::new(['T']));
        assert_eq!(layout.rows.len(), 4);
        assert_eq!(layout.rows[1], vec![1, 0, 0, 1]);
        assert_eq!(
            layout.placements,
            vec![
                Placement {
                    cell: GridCoord::new(1, 1),
                    kind: PlacementKind::Pickup(PickupKind::Key(KeyColor::Gold)),
                },
                Placement {
                    cell: GridCoord::new(2, 1),
                    kind: PlacementKind::Pickup(PickupKind::Weapon(WeaponKind::Pistol)),
                },
                Placement {
                    cell: GridCoord::new(1, 2),
                    kind: PlacementKind::Decoration('T'),
                },
            ]
        );
    }

    #[test]
    fn unknown_tokens_are_dropped() {
        let layout = parse_map("1 x 1\n1 -3 zz 12 1", &DecorationTable::default());
        assert_eq!(layout.rows, vec![vec![1, 1], vec![1, 12, 1]]);
        assert!(layout.placements.is_empty());
    }

    #[test]
    fn blank_rows_inside_the_map_are_kept() {
        let layout = parse_map("1 1\n\n1 1\n", &DecorationTable::default());
        assert_eq!(layout.rows, vec![vec![1, 1], vec![], vec![1, 1]]);
    }

    #[test]
    fn spawn_list_skips_comments_and_junk() {
        let text = "# guards\n3.5 4.5\n\nnope 1\n7 2.25 extra\n1.0\n";
        assert_eq!(parse_spawns(text), vec![Vec2::new(3.5, 4.5), Vec2::new(7.0, 2.25)]);
    }
}
