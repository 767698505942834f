//! Cosmetic overlay stages: flash, light leak, instant frame, date stamp.
//!
//! These run last and are cosmetic: a failure here is logged and skipped
//! rather than aborting the frame.

use emulsion_core::compose::overlay::{apply_flash, apply_instant_frame, apply_light_leak};
use emulsion_core::compose::stamp::apply_date_stamp;
use emulsion_core::params::{DateStampParams, FlashParams, InstantFrameParams, LightLeakParams};

use crate::error::StageError;
use crate::stage::{AuxiliaryTextures, Stage, StageSeverity, check_dims};
use crate::surface::Surface;

macro_rules! cosmetic_in_place_stage {
    ($(#[$doc:meta])* $name:ident, $params:ty, $label:literal, |$surface:ident, $params_var:ident| $body:expr) => {
        $(#[$doc])*
        pub struct $name {
            params: $params,
        }

        impl $name {
            pub fn new(params: $params) -> Self {
                Self { params }
            }
        }

        impl Stage for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn severity(&self) -> StageSeverity {
                StageSeverity::Cosmetic
            }

            fn in_place(&self) -> bool {
                true
            }

            fn apply(
                &self,
                src: &Surface,
                dst: &mut Surface,
                aux: &AuxiliaryTextures,
            ) -> Result<(), StageError> {
                check_dims(src, dst)?;
                dst.pixels.copy_from_slice(&src.pixels);
                self.apply_in_place(dst, aux)
            }

            fn apply_in_place(
                &self,
                $surface: &mut Surface,
                _aux: &AuxiliaryTextures,
            ) -> Result<(), StageError> {
                let $params_var = &self.params;
                $body;
                Ok(())
            }
        }
    };
}

cosmetic_in_place_stage!(
    /// Radial warm flash with shadow lift.
    FlashStage,
    FlashParams,
    "flash",
    |surface, params| apply_flash(&mut surface.pixels, surface.width, surface.height, params)
);

cosmetic_in_place_stage!(
    /// Seeded procedural light leak.
    LightLeakStage,
    LightLeakParams,
    "light_leak",
    |surface, params| apply_light_leak(&mut surface.pixels, surface.width, surface.height, params)
);

cosmetic_in_place_stage!(
    /// Instant-film border with edge fade and corner darkening.
    InstantFrameStage,
    InstantFrameParams,
    "instant_frame",
    |surface, params| {
        apply_instant_frame(&mut surface.pixels, surface.width, surface.height, params)
    }
);

cosmetic_in_place_stage!(
    /// Seven-segment date stamp.
    DateStampStage,
    DateStampParams,
    "date_stamp",
    |surface, params| apply_date_stamp(&mut surface.pixels, surface.width, surface.height, params)
);

#[cfg(test)]
mod tests {
    use super::*;
    use emulsion_core::image::PixelFormat;
    use emulsion_core::params::DigitString;

    fn surface(width: u32, height: u32, fill: [f32; 4]) -> Surface {
        Surface {
            id: 1,
            width,
            height,
            format: PixelFormat::Rgba32F,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    #[test]
    fn test_flash_brightens_center_most() {
        let stage = FlashStage::new(FlashParams {
            enabled: true,
            intensity: 0.8,
            ..Default::default()
        });
        let mut s = surface(64, 64, [0.3, 0.3, 0.3, 1.0]);
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        let center = s.pixels[32 * 64 + 32][1];
        let corner = s.pixels[0][1];
        assert!(center > 0.3);
        assert!(center > corner);
    }

    #[test]
    fn test_light_leak_is_seed_stable() {
        let params = LightLeakParams {
            enabled: true,
            intensity: 0.7,
            seed: 99,
            ..Default::default()
        };
        let stage = LightLeakStage::new(params);
        let mut a = surface(32, 32, [0.4, 0.4, 0.4, 1.0]);
        let mut b = surface(32, 32, [0.4, 0.4, 0.4, 1.0]);
        stage
            .apply_in_place(&mut a, &AuxiliaryTextures::default())
            .unwrap();
        stage
            .apply_in_place(&mut b, &AuxiliaryTextures::default())
            .unwrap();
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_instant_frame_paints_borders() {
        let stage = InstantFrameStage::new(InstantFrameParams {
            enabled: true,
            border_color: [0.95, 0.94, 0.9],
            ..Default::default()
        });
        let mut s = surface(100, 100, [0.0, 0.0, 0.0, 1.0]);
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        // Top-left corner sits inside the border.
        assert!(s.pixels[0][0] > 0.9);
        // Center stays image.
        assert!(s.pixels[50 * 100 + 50][0] < 0.1);
    }

    #[test]
    fn test_date_stamp_touches_only_its_corner() {
        let stage = DateStampStage::new(DateStampParams {
            enabled: true,
            digits: DigitString::parse("08 29 26").unwrap(),
            ..Default::default()
        });
        let mut s = surface(200, 200, [0.0, 0.0, 0.0, 1.0]);
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        // Default anchor is bottom-right; top half must be untouched.
        for y in 0..100 {
            for x in 0..200 {
                assert_eq!(s.pixels[y * 200 + x], [0.0, 0.0, 0.0, 1.0]);
            }
        }
        // Something was drawn somewhere.
        assert!(s.pixels.iter().any(|p| p[0] > 0.1));
    }
}
