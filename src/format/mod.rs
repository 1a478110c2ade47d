//! # Text Format
//!
//! Plain-text serialization of grids for external viewers.
//!
//! The layout is a header line `"<width> <height>"` followed by exactly
//! `height` lines, each holding `width` space-separated tile codes:
//!
//! ```text
//! 5 3
//! 1 1 1 1 1
//! 1 2 3 3 1
//! 1 1 1 1 1
//! ```

use crate::{DungeonError, DungeonResult, Grid, Tile};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a grid in the text format.
pub fn write_grid<W: Write>(grid: &Grid, mut writer: W) -> DungeonResult<()> {
    writeln!(writer, "{} {}", grid.width(), grid.height())?;

    for row in grid.rows() {
        let mut codes = row.iter();
        if let Some(first) = codes.next() {
            write!(writer, "{}", first.code())?;
        }
        for tile in codes {
            write!(writer, " {}", tile.code())?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders a grid to a string in the text format.
///
/// # Examples
///
/// ```
/// use delve::{format, Grid, Tile};
///
/// let mut grid = Grid::new(3, 3).unwrap();
/// grid.fill_rect(1, 1, 1, 1, Tile::Floor);
/// assert_eq!(format::to_text(&grid), "3 3\n1 1 1\n1 2 1\n1 1 1\n");
/// ```
pub fn to_text(grid: &Grid) -> String {
    let mut out = format!("{} {}\n", grid.width(), grid.height());
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|tile| tile.code().to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn parse_error(line: usize, message: impl Into<String>) -> DungeonError {
    DungeonError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_dimension(token: Option<&str>, name: &str) -> DungeonResult<u32> {
    let token = token.ok_or_else(|| parse_error(1, format!("missing {}", name)))?;
    let value: u32 = token
        .parse()
        .map_err(|_| parse_error(1, format!("invalid {} '{}'", name, token)))?;
    if value == 0 {
        return Err(parse_error(1, format!("{} must be positive", name)));
    }
    Ok(value)
}

/// Parses a grid from the text format.
///
/// Fails unless the header is two positive integers and exactly `height`
/// rows of exactly `width` known tile codes follow. Blank lines are only
/// allowed after the last row.
pub fn parse_grid(text: &str) -> DungeonResult<Grid> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (_, header) = lines
        .next()
        .ok_or_else(|| parse_error(1, "missing header"))?;
    let mut fields = header.split_whitespace();
    let width = parse_dimension(fields.next(), "width")?;
    let height = parse_dimension(fields.next(), "height")?;
    if fields.next().is_some() {
        return Err(parse_error(1, "header has more than two fields"));
    }

    let total = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| parse_error(1, format!("grid {}x{} is too large", width, height)))?;
    // Every tile takes at least two bytes of input.
    let mut tiles = Vec::with_capacity(total.min(text.len() / 2));
    let mut rows = 0u32;

    for (line_number, line) in lines {
        if line.trim().is_empty() {
            if rows < height {
                return Err(parse_error(
                    line_number,
                    format!("blank line where row {} of {} was expected", rows + 1, height),
                ));
            }
            continue;
        }
        if rows == height {
            return Err(parse_error(
                line_number,
                format!("more than {} rows", height),
            ));
        }

        let before = tiles.len();
        for token in line.split_whitespace() {
            let tile = token
                .parse::<u8>()
                .ok()
                .and_then(Tile::from_code)
                .ok_or_else(|| parse_error(line_number, format!("unknown tile code '{}'", token)))?;
            tiles.push(tile);
        }

        let columns = tiles.len() - before;
        if columns != width as usize {
            return Err(parse_error(
                line_number,
                format!("expected {} columns, found {}", width, columns),
            ));
        }
        rows += 1;
    }

    if rows != height {
        return Err(parse_error(
            rows as usize + 2,
            format!("expected {} rows, found {}", height, rows),
        ));
    }

    Ok(Grid::from_tiles(width, height, tiles))
}

/// Saves a grid to a file in the text format.
pub fn save_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> DungeonResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_grid(grid, BufWriter::new(file))?;
    debug!("Saved {}x{} grid to {}", grid.width(), grid.height(), path.display());
    Ok(())
}

/// Loads a grid previously written by [`save_to_file`].
pub fn load_from_file<P: AsRef<Path>>(path: P) -> DungeonResult<Grid> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_grid(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        let mut grid = Grid::new(5, 4).unwrap();
        grid.fill_rect(1, 1, 2, 2, Tile::Floor);
        grid.carve(3, 2, Tile::Corridor);
        grid.carve(3, 1, Tile::Door);
        grid.carve(4, 3, Tile::Empty);
        grid
    }

    #[test]
    fn test_text_shape() {
        let text = to_text(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "5 4");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "1 1 1 1 1");
        assert_eq!(lines[2], "1 2 2 4 1");
        assert_eq!(lines[3], "1 2 2 3 1");
        assert_eq!(lines[4], "1 1 1 1 0");
    }

    #[test]
    fn test_writer_matches_string_rendering() {
        let grid = sample();
        let mut buffer = Vec::new();
        write_grid(&grid, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_text(&grid));
    }

    #[test]
    fn test_parse_roundtrip() {
        let grid = sample();
        assert_eq!(parse_grid(&to_text(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_parse_tolerates_trailing_blank_lines_and_crlf() {
        let grid = parse_grid("3 3\r\n1 1 1\r\n1 2 1\r\n1 1 1\r\n\r\n\n").unwrap();
        assert_eq!(grid.get(1, 1), Some(Tile::Floor));
        assert_eq!(grid.count(Tile::Wall), 8);
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        assert!(matches!(
            parse_grid(""),
            Err(DungeonError::Parse { line: 1, .. })
        ));
        assert!(parse_grid("3\n1 1 1\n").is_err());
        assert!(parse_grid("3 x\n").is_err());
        assert!(parse_grid("0 2\n\n\n").is_err());
        assert!(parse_grid("1 1 1\n1\n").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_column_count() {
        let err = parse_grid("3 2\n1 1 1\n1 1\n").unwrap_err();
        assert!(matches!(err, DungeonError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_row_count() {
        assert!(matches!(
            parse_grid("2 3\n1 1\n1 1\n"),
            Err(DungeonError::Parse { line: 4, .. })
        ));
        assert!(matches!(
            parse_grid("2 1\n1 1\n1 1\n"),
            Err(DungeonError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        assert!(parse_grid("2 1\n1 5\n").is_err());
        assert!(parse_grid("2 1\n1 -1\n").is_err());
        assert!(parse_grid("2 1\n1 wall\n").is_err());
    }

    #[test]
    fn test_parse_rejects_blank_line_between_rows() {
        assert!(matches!(
            parse_grid("2 2\n1 1\n\n1 1\n"),
            Err(DungeonError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse_grid("2 2\n\n1 1\n1 1\n"),
            Err(DungeonError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_grid("2 2\n1 1\n  \t\n1 1\n"),
            Err(DungeonError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_header() {
        // The header claims far more tiles than the input holds; parsing must
        // fail on the short row instead of reserving the claimed size.
        assert!(matches!(
            parse_grid("4294967295 4294967295\n1\n"),
            Err(DungeonError::Parse { .. })
        ));
        assert!(matches!(
            parse_grid("100000 100000\n1 1\n"),
            Err(DungeonError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_grid("100000 100000\n"),
            Err(DungeonError::Parse { line: 2, .. })
        ));
    }
}
