//! Unit tests mirroring the `src` tree, one file per source module

mod io;
mod spatial;

/// Nine 3x3 tiles forming a 3x3 puzzle
///
/// Lattice points carry distinct letters so every edge is unique and
/// non-palindromic. Tile 1951 is the top-left corner and is listed first in
/// its solved orientation; the other tiles are rotated or mirrored.
pub const NINE_TILES: &str = "\
Tile 1951:
A.B
.#.
E.F

Tile 3079:
H.G
.#.
D.C

Tile 2729:
I.J
...
E.F

Tile 2971:
M.I
.#.
N.J

Tile 2473:
K.G
.#.
L.H

Tile 1171:
K.L
...
O.P

Tile 1489:
J.N
...
K.O

Tile 2311:
B.F
...
C.G

Tile 1427:
F.G
.#.
J.K
";

/// Tile ids of [`NINE_TILES`] as `[row][col]` in the solved layout
pub const NINE_TILE_LAYOUT: [[u64; 3]; 3] = [
    [1951, 2311, 3079],
    [2729, 1427, 2473],
    [2971, 1489, 1171],
];

/// Corner ids of [`NINE_TILES`] in input order
pub const NINE_TILE_CORNERS: [u64; 4] = [1951, 3079, 2971, 1171];

/// Stitched interiors of [`NINE_TILES`]
pub const NINE_TILE_IMAGE: [&str; 3] = ["#.#", ".##", "#.."];

/// Product of the four corner ids of [`NINE_TILES`]
pub const NINE_TILE_CORNER_PRODUCT: u64 = 1951 * 3079 * 2971 * 1171;
