//! Scene ownership and transitions.

use std::fmt;

use tracing::info;

use crate::render::{AssetSource, Surface};
use crate::scene::{Scene, SceneCommand, Tick};

/// Owns the single active scene.
pub struct SceneManager {
    active: Option<Box<dyn Scene>>,
    assets: Box<dyn AssetSource>,
}

impl fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("active", &self.active_name())
            .finish_non_exhaustive()
    }
}

impl SceneManager {
    /// Create a manager with no active scene.
    #[must_use]
    pub fn new(assets: Box<dyn AssetSource>) -> Self {
        Self {
            active: None,
            assets,
        }
    }

    /// Name of the active scene, if any.
    #[must_use]
    pub fn active_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(|scene| scene.name())
    }

    /// Replace the active scene.
    ///
    /// The outgoing scene is unloaded and dropped before the incoming scene
    /// loads; the incoming scene becomes active only once loaded.
    pub fn change_scene(&mut self, mut next: Box<dyn Scene>) {
        let from = match self.active.take() {
            Some(mut old) => {
                old.unload();
                Some(old.name())
            }
            None => None,
        };
        next.load(self.assets.as_ref());
        info!(from = from.unwrap_or("none"), to = next.name(), "scene changed");
        self.active = Some(next);
    }

    /// Update the active scene once and apply any change it requests.
    ///
    /// Does nothing without an active scene.
    pub fn update(&mut self, tick: &mut Tick<'_>) {
        let Some(scene) = self.active.as_mut() else {
            return;
        };
        if let SceneCommand::ChangeTo(next) = scene.update(tick) {
            self.change_scene(next);
        }
    }

    /// Draw the active scene once. Does nothing without an active scene.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(scene) = &self.active {
            scene.draw(surface);
        }
    }
}
