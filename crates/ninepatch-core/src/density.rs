use serde::{Deserialize, Serialize};

/// Android screen density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    pub const ALL: [Density; 5] = [
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// Export scale relative to the 1x (mdpi) document.
    pub fn scale(&self) -> f64 {
        match self {
            Density::Mdpi => 1.0,
            Density::Hdpi => 1.5,
            Density::Xhdpi => 2.0,
            Density::Xxhdpi => 3.0,
            Density::Xxxhdpi => 4.0,
        }
    }

    /// Resource qualifier, e.g. `xhdpi`.
    pub fn qualifier(&self) -> &'static str {
        match self {
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    pub fn from_scale(scale: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.scale() == scale)
    }

    /// Pixel size of a `width` x `height` region at this density.
    pub fn scaled_size(&self, width: f64, height: f64) -> (u32, u32) {
        let scale = self.scale();
        (
            (width * scale).round().max(0.0) as u32,
            (height * scale).round().max(0.0) as u32,
        )
    }

    /// Path of the resource file inside `res/`, e.g. `drawable-hdpi/card.9.png`.
    pub fn resource_path(&self, name: &str) -> String {
        format!("drawable-{}/{}.9.png", self.qualifier(), name)
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.qualifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_table() {
        let scales: Vec<f64> = Density::ALL.iter().map(Density::scale).collect();
        assert_eq!(scales, [1.0, 1.5, 2.0, 3.0, 4.0]);
        assert_eq!(Density::from_scale(1.5), Some(Density::Hdpi));
        assert_eq!(Density::from_scale(2.5), None);
    }

    #[test]
    fn test_scaled_size_rounds() {
        assert_eq!(Density::Hdpi.scaled_size(101.0, 33.0), (152, 50));
        assert_eq!(Density::Xxxhdpi.scaled_size(100.0, 50.0), (400, 200));
    }

    #[test]
    fn test_resource_path() {
        assert_eq!(Density::Xhdpi.resource_path("card"), "drawable-xhdpi/card.9.png");
        assert_eq!(Density::Mdpi.to_string(), "mdpi");
    }
}
