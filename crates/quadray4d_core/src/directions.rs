//! IVM direction tables
//!
//! [`AXIS_DIRECTIONS`] is the adjacency used by the grid, collision, corridor
//! carving and neighbour counts. [`KISSING_DIRECTIONS`] lists the twelve
//! closest-packing offsets from the Synergetics tables; nothing in this crate
//! iterates it as adjacency, and code that assumes twelve neighbours has to opt
//! in explicitly.

/// The 8 axis-aligned unit steps (±1 on exactly one axis)
pub const AXIS_DIRECTIONS: [[i32; 4]; 8] = [
    [1, 0, 0, 0],
    [-1, 0, 0, 0],
    [0, 1, 0, 0],
    [0, -1, 0, 0],
    [0, 0, 1, 0],
    [0, 0, -1, 0],
    [0, 0, 0, 1],
    [0, 0, 0, -1],
];

/// The 12 closest-packing (kissing sphere) offsets, permutations of (0, 1, 1, 2)
pub const KISSING_DIRECTIONS: [[i32; 4]; 12] = [
    [0, 1, 1, 2],
    [0, 1, 2, 1],
    [0, 2, 1, 1],
    [1, 0, 1, 2],
    [1, 0, 2, 1],
    [1, 1, 0, 2],
    [1, 1, 2, 0],
    [1, 2, 0, 1],
    [1, 2, 1, 0],
    [2, 0, 1, 1],
    [2, 1, 0, 1],
    [2, 1, 1, 0],
];

/// Offset a cell by a direction
#[inline]
pub fn offset(cell: [i32; 4], dir: [i32; 4]) -> [i32; 4] {
    [
        cell[0] + dir[0],
        cell[1] + dir[1],
        cell[2] + dir[2],
        cell[3] + dir[3],
    ]
}

/// The 8 axis neighbours of a cell, unbounded
pub fn axis_neighbors(cell: [i32; 4]) -> impl Iterator<Item = [i32; 4]> {
    AXIS_DIRECTIONS.iter().map(move |dir| offset(cell, *dir))
}
