use crate::error::{Result, SafePathError};
use crate::grid::Location;
use crate::registry::ObstacleRegistry;
use std::fmt;

/// A rectangular snapshot of the registry, one glyph per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleMap {
    pub top_left: Location,
    pub rows: Vec<Vec<char>>,
}

impl ObstacleMap {
    /// Renders every cell from `top_left` to `bottom_right` inclusive, rows top to bottom.
    ///
    /// Fails with `InvalidRegion` when `top_left` lies right of or below `bottom_right`.
    pub fn render(
        registry: &ObstacleRegistry,
        top_left: Location,
        bottom_right: Location,
    ) -> Result<Self> {
        if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return Err(SafePathError::InvalidRegion {
                top_left,
                bottom_right,
            });
        }

        let rows = (top_left.y..=bottom_right.y)
            .map(|y| {
                (top_left.x..=bottom_right.x)
                    .map(|x| registry.glyph_at(Location::new(x, y)))
                    .collect()
            })
            .collect();

        Ok(ObstacleMap { top_left, rows })
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Glyph at an absolute grid location, if it lies inside the map.
    pub fn glyph(&self, cell: Location) -> Option<char> {
        let row = usize::try_from(i64::from(cell.y) - i64::from(self.top_left.y)).ok()?;
        let column = usize::try_from(i64::from(cell.x) - i64::from(self.top_left.x)).ok()?;
        self.rows.get(row)?.get(column).copied()
    }
}

impl fmt::Display for ObstacleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::obstacle::{BottomlessPit, Camera, Fence, Guard};

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    #[test]
    fn test_render_rows_top_to_bottom() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Fence::new(loc(0, 0), loc(3, 0)));
        registry.add(Guard::new(loc(1, 0)));
        registry.add(BottomlessPit::new(loc(3, 3)));

        let map = ObstacleMap::render(&registry, loc(0, 0), loc(4, 3)).unwrap();
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 4);
        assert_eq!(map.to_string(), "fgff.\n.....\n..bbb\n..bbb\n");
        assert_eq!(map.glyph(loc(1, 0)), Some('g'));
        assert_eq!(map.glyph(loc(5, 0)), None);
        assert_eq!(map.glyph(loc(-1, 0)), None);
    }

    #[test]
    fn test_single_cell_region() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Camera::new(loc(0, 0), Direction::North));
        let map = ObstacleMap::render(&registry, loc(0, -3), loc(0, -3)).unwrap();
        assert_eq!(map.to_string(), "c\n");
    }

    #[test]
    fn test_inverted_corners_are_rejected() {
        let registry = ObstacleRegistry::new();
        assert!(matches!(
            ObstacleMap::render(&registry, loc(3, 0), loc(1, 5)),
            Err(SafePathError::InvalidRegion { .. })
        ));
        assert!(matches!(
            ObstacleMap::render(&registry, loc(0, 4), loc(5, 1)),
            Err(SafePathError::InvalidRegion { .. })
        ));
    }
}
