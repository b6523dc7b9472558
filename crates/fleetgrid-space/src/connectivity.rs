//! 4-connected components of a fleet grid.

use crate::projector::FleetGrid;
use fleetgrid_core::{CellSize, TilingCoord};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::fmt;

/// Index of a component within its [`Connectivity`].
///
/// Components are numbered in order of their anchor (top-left-most tile),
/// row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A maximal set of valid tiles reachable from one another by
/// 4-directional steps over valid tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    id: ComponentId,
    /// Tiles in BFS discovery order; `cells[0]` is the anchor.
    cells: Vec<TilingCoord>,
}

impl Component {
    /// This component's id.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Number of tiles. Never zero.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; components are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The top-left-most tile (row-major minimum).
    pub fn anchor(&self) -> TilingCoord {
        self.cells[0]
    }

    /// Tiles in BFS discovery order from the anchor.
    pub fn cells(&self) -> &[TilingCoord] {
        &self.cells
    }
}

/// Partition of a fleet grid's valid tiles into connected components.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{BaseGrid, CellSize, TilingCoord};
/// use fleetgrid_space::{project, Connectivity};
///
/// // Two rooms split by a wall column.
/// let grid = BaseGrid::from_rows(5, 2, &["..@..", "..@.."]).unwrap();
/// let fleet = project(&grid, CellSize::ONE);
/// let conn = Connectivity::analyze(&fleet);
/// assert_eq!(conn.len(), 2);
/// assert!(!conn.connected(TilingCoord::new(0, 0), TilingCoord::new(4, 1)));
/// ```
#[derive(Clone, Debug)]
pub struct Connectivity {
    cell_size: CellSize,
    components: Vec<Component>,
    labels: IndexMap<TilingCoord, ComponentId>,
}

impl Connectivity {
    /// Flood-fill every valid tile of `fleet`.
    ///
    /// Seeds are taken in row-major order, so the first tile of each
    /// component is its anchor and components come out sorted by anchor.
    pub fn analyze(fleet: &FleetGrid) -> Self {
        let mut labels: IndexMap<TilingCoord, ComponentId> = IndexMap::with_capacity(fleet.len());
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for seed in fleet.iter() {
            if labels.contains_key(&seed) {
                continue;
            }
            let id = ComponentId(components.len() as u32);
            let mut cells = Vec::new();
            labels.insert(seed, id);
            queue.push_back(seed);
            while let Some(tile) = queue.pop_front() {
                cells.push(tile);
                for n in fleet.neighbours(tile) {
                    if !labels.contains_key(&n) {
                        labels.insert(n, id);
                        queue.push_back(n);
                    }
                }
            }
            components.push(Component { id, cells });
        }

        Self {
            cell_size: fleet.cell_size(),
            components,
            labels,
        }
    }

    /// Cell size of the analysed fleet grid.
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// All components, sorted by anchor.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the fleet grid had no valid tiles.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Look up a component by id.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0 as usize)
    }

    /// The component holding `tile`, or `None` for an invalid tile.
    pub fn component_of(&self, tile: TilingCoord) -> Option<ComponentId> {
        self.labels.get(&tile).copied()
    }

    /// Whether both tiles are valid and in the same component.
    pub fn connected(&self, a: TilingCoord, b: TilingCoord) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    /// The component with the most tiles; ties go to the lowest anchor.
    pub fn largest(&self) -> Option<&Component> {
        let mut best: Option<&Component> = None;
        for comp in &self.components {
            if best.is_none_or(|b| comp.len() > b.len()) {
                best = Some(comp);
            }
        }
        best
    }

    /// Headline statistics for `fleet`, which must be the grid this
    /// connectivity was computed from.
    pub fn summary(&self, fleet: &FleetGrid) -> FleetGridSummary {
        FleetGridSummary {
            cell_size: self.cell_size,
            width: fleet.width(),
            height: fleet.height(),
            valid_tiles: fleet.len(),
            components: self.len(),
            largest_component: self.largest().map_or(0, Component::len),
        }
    }
}

/// Every component of `fleet`, sorted by anchor.
pub fn components(fleet: &FleetGrid) -> Vec<Component> {
    Connectivity::analyze(fleet).components
}

/// Size and connectivity statistics for one fleet grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleetGridSummary {
    /// Cell size of the fleet grid.
    pub cell_size: CellSize,
    /// Tile columns.
    pub width: u32,
    /// Tile rows.
    pub height: u32,
    /// Number of valid tiles.
    pub valid_tiles: usize,
    /// Number of connected components.
    pub components: usize,
    /// Tiles in the largest component (0 when empty).
    pub largest_component: usize,
}

impl fmt::Display for FleetGridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cs={}: {}x{} grid, {} valid tiles, {} components, largest={}",
            self.cell_size,
            self.width,
            self.height,
            self.valid_tiles,
            self.components,
            self.largest_component
        )
    }
}
