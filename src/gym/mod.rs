pub mod grid_maze;

pub use grid_maze::{GridMaze, GridMazeConfig, GridMazeError};
