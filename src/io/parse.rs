//! Parsing of tile definitions from text
//!
//! Input is a sequence of blocks, each a `Tile <id>:` header followed by the
//! rows of a square grid, separated by blank lines.

use crate::io::error::{Result, WithPath, parse_error};
use crate::spatial::tiles::{Pixel, Tile, TileId};
use ndarray::Array2;
use std::path::Path;

const HEADER_PREFIX: &str = "Tile";

/// Parse every tile block in `input`
///
/// # Errors
///
/// Returns `Parse` errors for malformed headers, empty blocks, ragged or
/// non-square grids, and blocks whose side differs from the first block
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>> {
    let mut tiles = Vec::new();
    let mut lines = input
        .lines()
        .map(str::trim_end)
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .peekable();

    while let Some((header_line, header)) = lines.next() {
        if header.is_empty() {
            continue;
        }
        let id = parse_header(header_line, header)?;

        let mut rows = Vec::new();
        while let Some((_, row)) = lines.next_if(|(_, row)| !row.is_empty()) {
            rows.push(row);
        }

        let tile = build_tile(header_line, id, &rows)?;
        if let Some(first) = tiles.first().map(Tile::side) {
            if tile.side() != first {
                return Err(parse_error(
                    header_line,
                    &format!(
                        "tile {id} has side {}, earlier tiles have side {first}",
                        tile.side()
                    ),
                ));
            }
        }
        tiles.push(tile);
    }

    log::debug!("parsed {} tiles", tiles.len());
    Ok(tiles)
}

/// Read and parse a tile file
///
/// # Errors
///
/// Returns a file system error if the file cannot be read, or any error of
/// [`parse_tiles`]
pub fn parse_tile_file(path: &Path) -> Result<Vec<Tile>> {
    let input = std::fs::read_to_string(path).with_path(path)?;
    parse_tiles(&input)
}

fn parse_header(line: usize, header: &str) -> Result<TileId> {
    let id_text = header
        .trim()
        .strip_prefix(HEADER_PREFIX)
        .and_then(|rest| rest.trim().strip_suffix(':'))
        .ok_or_else(|| parse_error(line, &format!("expected 'Tile <id>:', found '{header}'")))?;

    id_text
        .trim()
        .parse::<TileId>()
        .map_err(|e| parse_error(line, &format!("invalid tile id '{id_text}': {e}")))
}

fn build_tile(header_line: usize, id: TileId, rows: &[&str]) -> Result<Tile> {
    let side = rows.len();
    if side == 0 {
        return Err(parse_error(header_line, &format!("tile {id} has no rows")));
    }

    let mut pixels = Vec::with_capacity(side * side);
    for (offset, row) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != side {
            return Err(parse_error(
                header_line + offset + 1,
                &format!("tile {id} row has {width} symbols, expected {side}"),
            ));
        }
        if row.chars().any(char::is_whitespace) {
            return Err(parse_error(
                header_line + offset + 1,
                &format!("tile {id} row contains whitespace"),
            ));
        }
        pixels.extend(row.chars().map(Pixel::from));
    }

    let grid = Array2::from_shape_vec((side, side), pixels)
        .map_err(|e| parse_error(header_line, &e))?;
    Tile::new(id, grid).map_err(|e| parse_error(header_line, &e))
}
