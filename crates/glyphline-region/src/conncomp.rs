//! Connected component labeling of ink masks
//!
//! The first raster pass hands out provisional labels and records which
//! ones touch; the second replaces each with a dense label `1..=n`
//! numbered by first appearance. Label 0 is paper.

use crate::{RegionError, RegionResult};
use glyphline_core::{Box, Pix, PixelDepth};

/// Which neighbors count as touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// Edge neighbors only
    FourWay,
    /// Edge and corner neighbors
    #[default]
    EightWay,
}

const EDGE: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const EDGE_AND_CORNER: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl ConnectivityType {
    /// Connectivity to use for the background against this foreground,
    /// so ink and paper cannot both leak through the same corner.
    pub fn dual(self) -> Self {
        match self {
            Self::FourWay => Self::EightWay,
            Self::EightWay => Self::FourWay,
        }
    }

    pub(crate) fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::FourWay => &EDGE,
            Self::EightWay => &EDGE_AND_CORNER,
        }
    }

    /// Neighbors a top-to-bottom, left-to-right scan has already seen
    fn scanned(self) -> &'static [(i32, i32)] {
        match self {
            Self::FourWay => &EDGE[..2],
            Self::EightWay => &EDGE_AND_CORNER[..4],
        }
    }
}

/// One blob of ink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// 1-based, in raster order of the first pixel
    pub label: u32,
    pub pixel_count: u32,
    pub bounds: Box,
}

/// Label of every pixel, with the components they belong to
#[derive(Debug, Clone)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    components: Vec<ConnectedComponent>,
}

impl LabelMap {
    /// Label at (x, y); 0 for paper and for points off the image
    #[inline]
    pub fn label(&self, x: i32, y: i32) -> u32 {
        let inside = (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y);
        if inside {
            self.labels[y as usize * self.width as usize + x as usize]
        } else {
            0
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Components, component `n` at index `n - 1`
    pub fn components(&self) -> &[ConnectedComponent] {
        &self.components
    }

    pub fn into_components(self) -> Vec<ConnectedComponent> {
        self.components
    }
}

/// Disjoint sets over provisional labels; slot 0 is paper.
struct Equivalences {
    parent: Vec<u32>,
}

impl Equivalences {
    fn new() -> Self {
        Self { parent: vec![0] }
    }

    fn fresh(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn root(&mut self, mut id: u32) -> u32 {
        while self.parent[id as usize] != id {
            let up = self.parent[id as usize];
            self.parent[id as usize] = self.parent[up as usize];
            id = up;
        }
        id
    }

    /// Merge two sets under the older (smaller) root.
    fn join(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.root(a), self.root(b));
        self.parent[ra.max(rb) as usize] = ra.min(rb);
    }

    fn len(&self) -> usize {
        self.parent.len()
    }
}

/// Label the ink (1) pixels of a mask in two raster passes.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] unless the image is 1 bpp.
pub fn label_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<LabelMap> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 bpp",
            actual: pix.depth().bits(),
        });
    }
    let (w, h) = (pix.width(), pix.height());
    let at = |x: u32, y: u32| y as usize * w as usize + x as usize;
    let mut labels = vec![0u32; w as usize * h as usize];
    let mut sets = Equivalences::new();

    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) == 0 {
                continue;
            }
            let mut mine = 0;
            for &(dx, dy) in connectivity.scanned() {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if !(0..w as i32).contains(&nx) || ny < 0 {
                    continue;
                }
                match labels[at(nx as u32, ny as u32)] {
                    0 => {}
                    n if mine == 0 => mine = n,
                    n => sets.join(mine, n),
                }
            }
            labels[at(x, y)] = if mine == 0 { sets.fresh() } else { mine };
        }
    }

    // dense numbering in order of first appearance
    let mut dense = vec![0u32; sets.len()];
    let mut components: Vec<ConnectedComponent> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let slot = &mut labels[at(x, y)];
            if *slot == 0 {
                continue;
            }
            let root = sets.root(*slot) as usize;
            let pixel = Box::new_unchecked(x as i32, y as i32, 1, 1);
            if dense[root] == 0 {
                dense[root] = components.len() as u32 + 1;
                components.push(ConnectedComponent {
                    label: dense[root],
                    pixel_count: 0,
                    bounds: pixel,
                });
            }
            *slot = dense[root];
            let c = &mut components[*slot as usize - 1];
            c.pixel_count += 1;
            c.bounds = c.bounds.union(&pixel);
        }
    }

    Ok(LabelMap {
        width: w,
        height: h,
        labels,
        components,
    })
}

/// Every component of a mask with its pixel count and bounds
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    label_components(pix, connectivity).map(LabelMap::into_components)
}
