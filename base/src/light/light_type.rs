//! Light Types

use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags for the light types.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LightType: u8 {
        const DELTA_POSITION = 1;
        const DELTA_DIRECTION = 2;
        const AREA = 4;
        const INFINITE = 8;
    }
}

impl LightType {
    /// Returns true if the light is described by a delta distribution in
    /// position or direction; such lights can't be hit by sampled rays.
    pub fn is_delta_light(&self) -> bool {
        self.intersects(Self::DELTA_POSITION | Self::DELTA_DIRECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_lights() {
        assert!(LightType::DELTA_POSITION.is_delta_light());
        assert!(LightType::DELTA_DIRECTION.is_delta_light());
        assert!(!LightType::AREA.is_delta_light());
        assert!(!(LightType::AREA | LightType::INFINITE).is_delta_light());
    }
}
