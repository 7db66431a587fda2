// src/playback/animation.rs

//! The walk-state → animation asset table.

use crate::core::{WalkError, WalkResult};
use crate::walk::WalkState;

/// Maps each of the four walk states to an asset filename.
///
/// Every state has a slot, so a lookup can never miss; `validate` only
/// guards against empty filenames coming from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationMap {
    vertex_00: String,
    vertex_01: String,
    vertex_10: String,
    vertex_11: String,
}

impl Default for AnimationMap {
    fn default() -> Self {
        Self {
            vertex_00: "simonscatanimationvertex1.mp4".to_string(),
            vertex_01: "simonscatanimationvertex2.mp4".to_string(),
            vertex_10: "simonscatanimationvertex3.mp4".to_string(),
            vertex_11: "simonscatanimationvertex4.mp4".to_string(),
        }
    }
}

impl AnimationMap {
    /// Filename for `state`, relative to the asset directory.
    pub fn asset_for(&self, state: WalkState) -> &str {
        match state {
            WalkState::S00 => &self.vertex_00,
            WalkState::S01 => &self.vertex_01,
            WalkState::S10 => &self.vertex_10,
            WalkState::S11 => &self.vertex_11,
        }
    }

    /// Replaces the filename for `state`.
    pub fn set_asset(&mut self, state: WalkState, filename: impl Into<String>) {
        let slot = match state {
            WalkState::S00 => &mut self.vertex_00,
            WalkState::S01 => &mut self.vertex_01,
            WalkState::S10 => &mut self.vertex_10,
            WalkState::S11 => &mut self.vertex_11,
        };
        *slot = filename.into();
    }

    /// Builder form of [`AnimationMap::set_asset`].
    pub fn with_asset(mut self, state: WalkState, filename: impl Into<String>) -> Self {
        self.set_asset(state, filename);
        self
    }

    /// `(state, filename)` pairs in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (WalkState, &str)> + '_ {
        WalkState::ALL.into_iter().map(move |state| (state, self.asset_for(state)))
    }

    /// Every filename must be non-empty.
    pub fn validate(&self) -> WalkResult<()> {
        for (state, filename) in self.iter() {
            if filename.trim().is_empty() {
                return Err(WalkError::Config(format!("no animation asset configured for state {}", state)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_is_total() {
        let map = AnimationMap::default();
        assert!(map.validate().is_ok());
        for state in WalkState::ALL {
            assert!(!map.asset_for(state).is_empty(), "state {} has no asset", state);
        }
        assert_eq!(map.asset_for(WalkState::S00), "simonscatanimationvertex1.mp4");
        assert_eq!(map.asset_for(WalkState::S11), "simonscatanimationvertex4.mp4");
    }

    #[test]
    fn test_override_and_validate() {
        let map = AnimationMap::default().with_asset(WalkState::S10, "custom.webm");
        assert_eq!(map.asset_for(WalkState::S10), "custom.webm");
        assert_eq!(map.iter().count(), 4);

        let broken = AnimationMap::default().with_asset(WalkState::S01, "  ");
        match broken.validate() {
            Err(WalkError::Config(msg)) => assert!(msg.contains("01")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
