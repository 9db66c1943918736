//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of reflection models.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 0b00000001;
        const BSDF_TRANSMISSION = 0b00000010;
        const BSDF_DIFFUSE = 0b00000100;
        const BSDF_GLOSSY = 0b00001000;
        const BSDF_SPECULAR = 0b00010000;
        const BSDF_ALL = 0b00011111;
    }
}

impl BxDFType {
    /// Returns true if the lobe is specular.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR)
    }

    /// Returns the flags used to sample or evaluate a BSDF with or without
    /// its specular lobes.
    ///
    /// * `specular` - Include specular lobes.
    pub fn sampling_flags(specular: bool) -> Self {
        if specular {
            Self::BSDF_ALL
        } else {
            Self::BSDF_ALL & !Self::BSDF_SPECULAR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_flags_exclude_specular() {
        let flags = BxDFType::sampling_flags(false);
        assert!(!flags.is_specular());
        assert!(flags.contains(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE));
        assert_eq!(BxDFType::sampling_flags(true), BxDFType::BSDF_ALL);
    }
}
