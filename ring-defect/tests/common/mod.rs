#![allow(dead_code)]

use image::{GrayImage, Luma};

/// Disk used to add or remove material
#[derive(Debug, Clone, Copy)]
pub struct Disk {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Disk {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as f64 - self.cx;
        let dy = y as f64 - self.cy;
        dx * dx + dy * dy <= self.r * self.r
    }
}

/// Synthetic part mask: an annulus plus added and removed disks
#[derive(Debug, Clone)]
pub struct SyntheticRing {
    width: u32,
    height: u32,
    cx: f64,
    cy: f64,
    r_out: f64,
    r_in: f64,
    added: Vec<Disk>,
    removed: Vec<Disk>,
}

impl SyntheticRing {
    pub fn new(width: u32, height: u32, cx: f64, cy: f64, r_out: f64, r_in: f64) -> Self {
        Self { width, height, cx, cy, r_out, r_in, added: Vec::new(), removed: Vec::new() }
    }

    /// 401x401 ring centered at (200, 200) with radii 150 and 80
    pub fn standard() -> Self {
        Self::new(401, 401, 200.0, 200.0, 150.0, 80.0)
    }

    /// Add material at `angle` (radians), `offset` pixels from the center
    pub fn bump(mut self, angle: f64, offset: f64, r: f64) -> Self {
        self.added.push(self.disk_at(angle, offset, r));
        self
    }

    /// Remove material at `angle` (radians), `offset` pixels from the center
    pub fn notch(mut self, angle: f64, offset: f64, r: f64) -> Self {
        self.removed.push(self.disk_at(angle, offset, r));
        self
    }

    pub fn r_out(&self) -> f64 {
        self.r_out
    }

    pub fn r_in(&self) -> f64 {
        self.r_in
    }

    fn disk_at(&self, angle: f64, offset: f64, r: f64) -> Disk {
        Disk::new(self.cx + offset * angle.cos(), self.cy + offset * angle.sin(), r)
    }

    pub fn render(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let dx = x as f64 - self.cx;
            let dy = y as f64 - self.cy;
            let d2 = dx * dx + dy * dy;
            let in_ring = d2 <= self.r_out * self.r_out && d2 >= self.r_in * self.r_in;
            let added = self.added.iter().any(|d| d.contains(x, y));
            let removed = self.removed.iter().any(|d| d.contains(x, y));
            if (in_ring || added) && !removed { Luma([255]) } else { Luma([0]) }
        })
    }
}

/// Filled disk without a hole
pub fn filled_disk(width: u32, height: u32, cx: f64, cy: f64, r: f64) -> GrayImage {
    let disk = Disk::new(cx, cy, r);
    GrayImage::from_fn(width, height, |x, y| if disk.contains(x, y) { Luma([255]) } else { Luma([0]) })
}
