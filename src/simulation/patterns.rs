use rand::Rng;

use crate::simulation::grid::Grid;

/// Name that selects random seeding instead of a fixed layout
pub const RANDOM_PATTERN: &str = "random";

/// A named, compiled-in starting layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    /// Offsets (x, y) of live cells relative to the pattern origin
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Largest x and y among the pattern's cells
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(max_x, max_y), &(x, y)| (max_x.max(x), max_y.max(y)))
    }
}

/// Blinker - period 2 oscillator
pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 1), (1, 1), (2, 1)],
};

/// Glider - simplest spaceship, moves diagonally
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

/// Lightweight spaceship (LWSS)
#[rustfmt::skip]
pub const LIGHTWEIGHT_SPACESHIP: Pattern = Pattern {
    name: "lightweightspaceship",
    cells: &[
        (0, 1), (0, 3),
        (1, 0),
        (2, 0), (2, 3),
        (3, 0), (3, 1), (3, 2),
    ],
};

/// Pulsar - period 3 oscillator
#[rustfmt::skip]
pub const PULSAR: Pattern = Pattern {
    name: "pulsar",
    cells: &[
        (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
        (0, 2), (5, 2), (7, 2), (12, 2),
        (0, 3), (5, 3), (7, 3), (12, 3),
        (0, 4), (5, 4), (7, 4), (12, 4),
        (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
        (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
        (0, 8), (5, 8), (7, 8), (12, 8),
        (0, 9), (5, 9), (7, 9), (12, 9),
        (0, 10), (5, 10), (7, 10), (12, 10),
        (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
    ],
};

pub const PRESETS: &[Pattern] = &[BLINKER, GLIDER, LIGHTWEIGHT_SPACESHIP, PULSAR];

/// Look up a preset by name
pub fn find(name: &str) -> Option<&'static Pattern> {
    PRESETS.iter().find(|pattern| pattern.name == name)
}

/// Every accepted pattern name, `random` first
pub fn names() -> impl Iterator<Item = &'static str> {
    std::iter::once(RANDOM_PATTERN).chain(PRESETS.iter().map(|pattern| pattern.name))
}

/// Build the starting grid.
///
/// A known preset is placed centered; `random` (or any unknown name) marks
/// each cell alive with probability `threshold`.
pub fn seed<R: Rng>(
    pattern_name: &str,
    threshold: f32,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, cols);

    match find(pattern_name) {
        Some(pattern) => {
            let placed = place_centered(&mut grid, pattern);
            log::info!(
                "Seeded pattern '{}' ({} of {} cells placed)",
                pattern.name,
                placed,
                pattern.cells.len()
            );
        }
        None => {
            if pattern_name != RANDOM_PATTERN {
                log::warn!("Unknown pattern '{}', seeding randomly", pattern_name);
            }
            randomize(&mut grid, threshold, rng);
            log::info!(
                "Seeded randomly with threshold {:.2} ({} cells alive)",
                threshold,
                grid.population()
            );
        }
    }

    grid
}

/// Place a pattern in the middle of the grid, returning how many cells fit.
///
/// Offsets are floor((dimension - extent) / 2) per axis; cells landing
/// outside the grid are skipped.
pub fn place_centered(grid: &mut Grid, pattern: &Pattern) -> usize {
    let (max_x, max_y) = pattern.extent();
    let offset_x = (grid.cols() as isize - max_x as isize).div_euclid(2);
    let offset_y = (grid.rows() as isize - max_y as isize).div_euclid(2);

    let mut placed = 0;
    for &(x, y) in pattern.cells {
        let gx = x as isize + offset_x;
        let gy = y as isize + offset_y;
        if (0..grid.cols() as isize).contains(&gx) && (0..grid.rows() as isize).contains(&gy) {
            grid.set(gx as usize, gy as usize, true);
            placed += 1;
        }
    }
    placed
}

/// Mark every cell alive independently with probability `threshold`
pub fn randomize<R: Rng>(grid: &mut Grid, threshold: f32, rng: &mut R) {
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            grid.set(x, y, rng.gen::<f32>() < threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        grid.iter_cells()
            .filter(|(_, _, cell)| cell.alive)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = names().collect();
        assert_eq!(
            names,
            vec!["random", "blinker", "glider", "lightweightspaceship", "pulsar"]
        );
        assert!(find("random").is_none());
        assert_eq!(find("pulsar"), Some(&PULSAR));
    }

    #[test]
    fn test_extent() {
        assert_eq!(BLINKER.extent(), (2, 1));
        assert_eq!(LIGHTWEIGHT_SPACESHIP.extent(), (3, 3));
        assert_eq!(PULSAR.extent(), (12, 12));
    }

    #[test]
    fn test_blinker_centered_and_flips() {
        let mut grid = seed("blinker", 0.5, 100, 100, &mut rng());
        // offset = ((100 - 2) / 2, (100 - 1) / 2) = (49, 49)
        assert_eq!(live_cells(&grid), vec![(49, 50), (50, 50), (51, 50)]);

        grid.advance();
        assert_eq!(live_cells(&grid), vec![(50, 49), (50, 50), (50, 51)]);
    }

    #[test]
    fn test_preset_ignores_threshold() {
        let grid = seed("glider", 1.0, 20, 20, &mut rng());
        assert_eq!(grid.population(), GLIDER.cells.len());
    }

    #[test]
    fn test_seeded_cells_are_settled() {
        for name in names() {
            let grid = seed(name, 0.5, 30, 30, &mut rng());
            assert!(grid.iter_cells().all(|(_, _, cell)| cell.alive == cell.alive_next));
        }
    }

    #[test]
    fn test_threshold_extremes() {
        let grid = seed("random", 0.0, 50, 50, &mut rng());
        assert_eq!(grid.population(), 0);

        let grid = seed("random", 1.0, 50, 50, &mut rng());
        assert_eq!(grid.population(), 2500);
    }

    #[test]
    fn test_random_density_roughly_matches_threshold() {
        let grid = seed("random", 0.15, 100, 100, &mut rng());
        let population = grid.population();
        assert!((1200..1800).contains(&population), "population {}", population);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = seed("random", 0.3, 40, 40, &mut rng());
        let b = seed("random", 0.3, 40, 40, &mut rng());
        assert_eq!(live_cells(&a), live_cells(&b));
    }

    #[test]
    fn test_unknown_name_falls_back_to_random() {
        let grid = seed("gosper", 1.0, 10, 10, &mut rng());
        assert_eq!(grid.population(), 100);
    }

    #[test]
    fn test_out_of_bounds_cells_skipped() {
        // Pulsar spans 13x13 so on a 10x10 grid the offset is -1 on both axes
        let mut grid = Grid::new(10, 10);
        let placed = place_centered(&mut grid, &PULSAR);

        let expected: Vec<(usize, usize)> = {
            let mut inside: Vec<_> = PULSAR
                .cells
                .iter()
                .filter(|&&(x, y)| (1..=10).contains(&x) && (1..=10).contains(&y))
                .map(|&(x, y)| (x - 1, y - 1))
                .collect();
            inside.sort_by_key(|&(x, y)| (y, x));
            inside
        };

        assert_eq!(placed, expected.len());
        assert!(placed < PULSAR.cells.len());
        assert_eq!(live_cells(&grid), expected);
    }

    #[test]
    fn test_pattern_larger_than_one_axis() {
        // Only the column axis is too small; offset_x = floor((3 - 3) / 2) = 0
        let mut grid = Grid::new(20, 3);
        let placed = place_centered(&mut grid, &LIGHTWEIGHT_SPACESHIP);
        let on_grid = LIGHTWEIGHT_SPACESHIP.cells.iter().filter(|&&(x, _)| x < 3).count();
        assert_eq!(placed, on_grid);
        assert_eq!(grid.population(), on_grid);
    }
}
