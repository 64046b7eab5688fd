use super::agent::{Agent, Narrative, State};
use fnv::FnvHashMap;

// A cell of the fixed plane-covering grid. Heat is the number of
// believers currently inside the cell; both mutable fields are
// rebuilt from scratch every step, since heat represents current
// proximity rather than history.
#[derive(Debug, Clone)]
pub struct Patch {
    pub px: usize,
    pub py: usize,

    // Pixel-space origin of the covered rectangle
    pub x: f32,
    pub y: f32,

    pub heat: usize,
    pub narrative_density: FnvHashMap<Narrative, usize>,
}

impl Patch {
    // Saturating display intensity for the renderer
    pub fn intensity(&self) -> f32 {
        f32::min(self.heat as f32 * 0.12, 0.6)
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    pub patch_size: f32,
    pub patches: Vec<Patch>,
}

impl Grid {
    pub fn new(width: f32, height: f32, patch_size: f32) -> Grid {
        let cols = (width / patch_size).floor() as usize;
        let rows = (height / patch_size).floor() as usize;
        let mut patches = Vec::with_capacity(cols * rows);
        for i in 0..cols {
            for j in 0..rows {
                patches.push(Patch {
                    px: i,
                    py: j,
                    x: i as f32 * patch_size,
                    y: j as f32 * patch_size,
                    heat: 0,
                    narrative_density: FnvHashMap::default(),
                });
            }
        }
        Grid {
            cols: cols,
            rows: rows,
            patch_size: patch_size,
            patches: patches,
        }
    }

    fn index_of(&self, x: f32, y: f32) -> usize {
        let px = ((x / self.patch_size).floor() as usize).min(self.cols - 1);
        let py = ((y / self.patch_size).floor() as usize).min(self.rows - 1);
        px * self.rows + py
    }

    pub fn patch_at(&self, x: f32, y: f32) -> &Patch {
        &self.patches[self.index_of(x, y)]
    }

    // Reset everything, then accumulate this step's believers.
    pub fn rebuild(&mut self, agents: &Vec<Agent>) {
        for p in self.patches.iter_mut() {
            p.heat = 0;
            p.narrative_density.clear();
        }
        for a in agents {
            if a.state != State::Believer {
                continue;
            }
            let idx = self.index_of(a.x, a.y);
            let patch = &mut self.patches[idx];
            patch.heat += 1;
            for n in &a.believed_narratives {
                let count = patch.narrative_density.entry(*n).or_insert(0);
                *count += 1;
            }
        }
    }
}
