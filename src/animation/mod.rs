//! Keyed animation sets and the per-entity selection policies built on them.
//!
//! Every creature owns one [`AnimationSet`] keyed by a small closed enum. A set entry is
//! either a single [`FrameSequence`] or a [`DirectionalSequence`]; the entity's policy
//! decides which key is current from the entity's state and advances the chosen sequence.

pub mod bonus;
pub mod ghost;
pub mod pac;
pub mod world;

use std::fmt::Debug;

use smallvec::SmallVec;
use tracing::trace;

use crate::entity::Direction;
use crate::error::ConfigurationError;
use crate::texture::animated::FrameSequence;
use crate::texture::directional::DirectionalSequence;

pub use bonus::BonusAnimations;
pub use ghost::{GhostAnimationKey, GhostAnimations};
pub use pac::{PacAnimationKey, PacAnimations};
pub use world::WorldAnimations;

/// A closed set of animation names.
pub trait AnimationKey: Copy + Eq + Debug + Into<&'static str> {}

impl<K> AnimationKey for K where K: Copy + Eq + Debug + Into<&'static str> {}

/// Either a plain sequence or one sequence per direction.
#[derive(Debug, Clone)]
pub enum Animation<T> {
    Single(FrameSequence<T>),
    Directional(DirectionalSequence<T>),
}

impl<T> Animation<T> {
    /// The sequence shown for a facing direction. Single sequences ignore it.
    pub fn sequence(&self, direction: Direction) -> &FrameSequence<T> {
        match self {
            Animation::Single(seq) => seq,
            Animation::Directional(seqs) => seqs.get(direction),
        }
    }

    pub fn sequence_mut(&mut self, direction: Direction) -> &mut FrameSequence<T> {
        match self {
            Animation::Single(seq) => seq,
            Animation::Directional(seqs) => seqs.get_mut(direction),
        }
    }

    pub fn restart(&mut self) {
        match self {
            Animation::Single(seq) => seq.restart(),
            Animation::Directional(seqs) => seqs.restart(),
        }
    }

    pub fn stop(&mut self) {
        match self {
            Animation::Single(seq) => seq.stop(),
            Animation::Directional(seqs) => seqs.stop(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Animation::Single(seq) => seq.reset(),
            Animation::Directional(seqs) => seqs.reset(),
        }
    }

    pub fn ensure_running(&mut self) {
        match self {
            Animation::Single(seq) => seq.ensure_running(),
            Animation::Directional(seqs) => seqs.ensure_running(),
        }
    }

    pub fn is_running(&self) -> bool {
        match self {
            Animation::Single(seq) => seq.is_running(),
            Animation::Directional(seqs) => seqs.is_running(),
        }
    }
}

impl<T> From<FrameSequence<T>> for Animation<T> {
    fn from(seq: FrameSequence<T>) -> Self {
        Animation::Single(seq)
    }
}

impl<T> From<DirectionalSequence<T>> for Animation<T> {
    fn from(seqs: DirectionalSequence<T>) -> Self {
        Animation::Directional(seqs)
    }
}

/// A small ordered map from animation keys to animations, plus the selected key.
#[derive(Debug, Clone)]
pub struct AnimationSet<K, T> {
    entries: SmallVec<[(K, Animation<T>); 5]>,
    selected: Option<K>,
}

impl<K: AnimationKey, T> Default for AnimationSet<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AnimationKey, T> AnimationSet<K, T> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            selected: None,
        }
    }

    pub fn with(mut self, key: K, animation: impl Into<Animation<T>>) -> Self {
        self.insert(key, animation);
        self
    }

    /// Adds an animation, replacing any previous one under the same key.
    pub fn insert(&mut self, key: K, animation: impl Into<Animation<T>>) {
        let animation = animation.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = animation,
            None => self.entries.push((key, animation)),
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn get(&self, key: K) -> Option<&Animation<T>> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut Animation<T>> {
        self.entries.iter_mut().find(|(k, _)| *k == key).map(|(_, a)| a)
    }

    /// Like [`AnimationSet::get`] but an absent key is a configuration error.
    pub fn require(&self, key: K) -> Result<&Animation<T>, ConfigurationError> {
        self.get(key).ok_or(ConfigurationError::UnknownAnimationKey(key.into()))
    }

    pub fn require_mut(&mut self, key: K) -> Result<&mut Animation<T>, ConfigurationError> {
        self.get_mut(key).ok_or(ConfigurationError::UnknownAnimationKey(key.into()))
    }

    /// Makes `key` the current animation.
    pub fn select(&mut self, key: K) -> Result<(), ConfigurationError> {
        if !self.contains(key) {
            return Err(ConfigurationError::UnknownAnimationKey(key.into()));
        }
        if self.selected != Some(key) {
            trace!(from = ?self.selected, to = ?key, "Animation selected");
            self.selected = Some(key);
        }
        Ok(())
    }

    /// Clears the selection; nothing is drawn until something is selected again.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    pub fn is_selected(&self, key: K) -> bool {
        self.selected == Some(key)
    }

    pub fn selected_animation(&self) -> Option<&Animation<T>> {
        self.selected.and_then(|key| self.get(key))
    }

    pub fn selected_animation_mut(&mut self) -> Option<&mut Animation<T>> {
        let key = self.selected?;
        self.get_mut(key)
    }

    pub fn ensure_running(&mut self) {
        self.entries.iter_mut().for_each(|(_, a)| a.ensure_running());
    }

    pub fn restart_all(&mut self) {
        self.entries.iter_mut().for_each(|(_, a)| a.restart());
    }

    pub fn stop_all(&mut self) {
        self.entries.iter_mut().for_each(|(_, a)| a.stop());
    }

    pub fn reset_all(&mut self) {
        self.entries.iter_mut().for_each(|(_, a)| a.reset());
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}
