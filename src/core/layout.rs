use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Quaternion (x, y, z, w) turning instances half a turn around the y axis.
pub const HALF_TURN_Y: [f32; 4] = [0.0, 1.0, 0.0, 0.0];

/// Scale of the single large instance in the "one huge, many small" layouts.
const LARGE_SCALE: f32 = 0.85;
/// Scale of each small instance in the "one huge, many small" layouts.
const SMALL_SCALE: f32 = 0.025;
/// Fraction of the unit cube the small instances are packed into.
const SMALL_SPREAD: f32 = 0.4;

/// Largest number of mesh instances in a scene. Node indices are `u32`, and
/// the camera and light nodes follow the instances.
pub const MAX_INSTANCES: u64 = u32::MAX as u64 - 2;

#[remain::sorted]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Layout asks for {0} instances, more than the {max} a scene can index", max = MAX_INSTANCES)]
    TooManyInstances(u64),
    #[error("Unknown layout: {0} (expected one of grid, random-cube, split-x, corner, long-interval)")]
    UnknownLayout(String),
}

/// Translation, rotation and scale of one scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl NodeTransform {
    pub fn new(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self { translation, rotation, scale }
    }

    fn uniform(translation: [f32; 3], scale: f32) -> Self {
        Self::new(translation, HALF_TURN_Y, [scale; 3])
    }
}

/// Placement strategies for the mesh instances of a scene. Every instance
/// refers to the same mesh and is rotated by [`HALF_TURN_Y`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Layout {
    /// Regular `x * y * z` grid filling the unit cube. Each instance is scaled
    /// down to its cell.
    Grid { x: u32, y: u32, z: u32 },
    /// `x * y * z` instances, scaled like `Grid`, scattered uniformly over the
    /// unit cube.
    RandomCube { x: u32, y: u32, z: u32 },
    /// One large instance on the high-x side and small ones in the low-x slab.
    SplitX { small_count: u32 },
    /// One large instance near the far corner and small ones clustered near
    /// the origin.
    Corner { small_count: u32 },
    /// One large instance at the origin and small ones placed one unit apart
    /// along the x axis.
    LongInterval { small_count: u32 },
}

impl Default for Layout {
    fn default() -> Self {
        Layout::LongInterval { small_count: 100 }
    }
}

impl FromStr for Layout {
    type Err = Err;

    /// Parses a layout name into the layout with its default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Layout::Grid { x: 32, y: 32, z: 32 }),
            "random-cube" => Ok(Layout::RandomCube { x: 16, y: 16, z: 16 }),
            "split-x" => Ok(Layout::SplitX { small_count: 100 }),
            "corner" => Ok(Layout::Corner { small_count: 100 }),
            "long-interval" => Ok(Layout::LongInterval { small_count: 100 }),
            _ => Err(Err::UnknownLayout(s.to_string())),
        }
    }
}

impl Layout {
    /// Number of mesh instances the layout produces. Fails when the count
    /// exceeds [`MAX_INSTANCES`].
    pub fn num_instances(&self) -> Result<usize, Err> {
        let count = match *self {
            Layout::Grid { x, y, z } | Layout::RandomCube { x, y, z } => {
                // the product of three u32 can exceed u64, saturate instead
                (x as u64).saturating_mul(y as u64).saturating_mul(z as u64)
            }
            Layout::SplitX { small_count }
            | Layout::Corner { small_count }
            | Layout::LongInterval { small_count } => small_count as u64 + 1,
        };
        if count > MAX_INSTANCES {
            return Err(Err::TooManyInstances(count));
        }
        usize::try_from(count).map_err(|_| Err::TooManyInstances(count))
    }

    /// Produces the instance transforms. Only the random layouts draw from `rng`.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<NodeTransform>, Err> {
        let num_instances = self.num_instances()?;
        let mut nodes = Vec::with_capacity(num_instances);
        match *self {
            Layout::Grid { x, y, z } => {
                let step = cell_size(x, y, z);
                for i in 0..x {
                    for j in 0..y {
                        for k in 0..z {
                            let translation = [i as f32 * step[0], j as f32 * step[1], k as f32 * step[2]];
                            nodes.push(NodeTransform::new(translation, HALF_TURN_Y, step));
                        }
                    }
                }
            }
            Layout::RandomCube { x, y, z } => {
                let step = cell_size(x, y, z);
                for _ in 0..num_instances {
                    let translation = [rng.random(), rng.random(), rng.random()];
                    nodes.push(NodeTransform::new(translation, HALF_TURN_Y, step));
                }
            }
            Layout::SplitX { small_count } => {
                nodes.push(NodeTransform::uniform([0.9, 0.5, 0.5], LARGE_SCALE));
                for _ in 0..small_count {
                    let translation = [rng.random::<f32>() * SMALL_SPREAD, rng.random(), rng.random()];
                    nodes.push(NodeTransform::uniform(translation, SMALL_SCALE));
                }
            }
            Layout::Corner { small_count } => {
                nodes.push(NodeTransform::uniform([0.9, 0.9, 0.9], LARGE_SCALE));
                for _ in 0..small_count {
                    let translation = [
                        rng.random::<f32>() * SMALL_SPREAD,
                        rng.random::<f32>() * SMALL_SPREAD,
                        rng.random::<f32>() * SMALL_SPREAD,
                    ];
                    nodes.push(NodeTransform::uniform(translation, SMALL_SCALE));
                }
            }
            Layout::LongInterval { small_count } => {
                nodes.push(NodeTransform::uniform([0.0, 0.0, 0.0], LARGE_SCALE));
                for i in 0..small_count {
                    let translation = [
                        i as f32,
                        rng.random::<f32>() * SMALL_SPREAD,
                        rng.random::<f32>() * SMALL_SPREAD,
                    ];
                    nodes.push(NodeTransform::uniform(translation, SMALL_SCALE));
                }
            }
        }
        Ok(nodes)
    }
}

fn cell_size(x: u32, y: u32, z: u32) -> [f32; 3] {
    [1.0 / x as f32, 1.0 / y as f32, 1.0 / z as f32]
}
