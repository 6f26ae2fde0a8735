//! Sprite collections and depth ordering

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::{Bounds, Sprite};

/// An owned collection of sprites, updated and culled together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteList {
    sprites: Vec<Sprite>,
}

impl SpriteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.sprites.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    /// Number of sprites matching `pred`
    pub fn count_where(&self, pred: impl Fn(&Sprite) -> bool) -> usize {
        self.sprites.iter().filter(|s| pred(s)).count()
    }

    /// Move every sprite matching `pred` out of this list, keeping order
    pub fn take_where(&mut self, pred: impl Fn(&Sprite) -> bool) -> Vec<Sprite> {
        let (taken, kept): (Vec<Sprite>, Vec<Sprite>) = std::mem::take(&mut self.sprites)
            .into_iter()
            .partition(|s| pred(s));
        self.sprites = kept;
        taken
    }

    /// Advance every sprite one step, then drop the dead ones
    pub fn update(&mut self, bounds: &Bounds) {
        for sprite in &mut self.sprites {
            sprite.update();
        }
        self.sprites.retain(|s| s.is_alive(bounds));
    }

    /// Indices of sprites whose hit box contains `point`
    pub fn sprites_at_point(&self, point: Vec2) -> Vec<usize> {
        self.sprites
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains_point(point))
            .map(|(i, _)| i)
            .collect()
    }

    /// Stable in-place sort, smallest (farthest) first
    pub fn sort_by_scale(&mut self) {
        self.sprites.sort_by(|a, b| a.scale.total_cmp(&b.scale));
    }
}

impl Extend<Sprite> for SpriteList {
    fn extend<T: IntoIterator<Item = Sprite>>(&mut self, iter: T) {
        self.sprites.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SpriteList {
    type Item = &'a Sprite;
    type IntoIter = std::slice::Iter<'a, Sprite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sprites.iter()
    }
}

/// Merge several lists into one draw order sorted by scale, so bigger
/// (nearer) sprites are drawn over smaller ones. Ties keep list order.
pub fn depth_order<'a>(lists: &[&'a SpriteList]) -> Vec<&'a Sprite> {
    let mut merged: Vec<&Sprite> = lists.iter().flat_map(|l| l.iter()).collect();
    merged.sort_by(|a, b| a.scale.total_cmp(&b.scale));
    merged
}
