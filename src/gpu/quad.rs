use crate::simulation::Grid;

/// Corners of the unit quad as two triangles, in [0, 1] space.
/// The vertex shader stretches it over each instance's rectangle.
pub const UNIT_QUAD: [[f32; 2]; 6] = [
    [0.0, 1.0], // Top left
    [0.0, 0.0], // Bottom left
    [1.0, 0.0], // Bottom right
    [0.0, 1.0], // Top left
    [1.0, 1.0], // Top right
    [1.0, 0.0], // Bottom right
];

/// Screen rectangle of one cell in normalized device coordinates (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

/// Screen positions of every cell, computed once for a grid size.
///
/// Cell x runs left to right and y bottom to top across the whole surface.
pub struct CellLayout {
    cols: usize,
    quads: Vec<QuadInstance>,
}

impl CellLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        let width = 1.0 / cols as f32;
        let height = 1.0 / rows as f32;

        let quads = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| (x, y)))
            .map(|(x, y)| {
                let left = x as f32 * width;
                let bottom = y as f32 * height;
                QuadInstance {
                    min: [to_ndc(left), to_ndc(bottom)],
                    max: [to_ndc(left + width), to_ndc(bottom + height)],
                }
            })
            .collect();

        Self { cols, quads }
    }

    /// Number of cells covered (upper bound on instances per frame)
    pub fn cell_count(&self) -> usize {
        self.quads.len()
    }

    pub fn quad(&self, x: usize, y: usize) -> Option<&QuadInstance> {
        (x < self.cols).then(|| self.quads.get(y * self.cols + x)).flatten()
    }

    /// One instance per live cell; dead cells draw nothing
    pub fn draw_list(&self, grid: &Grid) -> Vec<QuadInstance> {
        debug_assert_eq!(grid.rows() * grid.cols(), self.quads.len(), "Layout size mismatch");

        grid.iter_cells()
            .filter(|(_, _, cell)| cell.alive)
            .filter_map(|(x, y, _)| self.quad(x, y).copied())
            .collect()
    }
}

/// Map [0, 1] to [-1, 1]
fn to_ndc(position: f32) -> f32 {
    position * 2.0 - 1.0
}
