//! Data files embedded in the binary

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "assets/"]
struct EmbeddedAssets;

/// Contents of an embedded asset, if present and valid UTF-8
pub fn asset_str(name: &str) -> Option<String> {
    let file = EmbeddedAssets::get(name)?;
    String::from_utf8(file.data.into_owned()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_assets_present() {
        assert!(asset_str("vendors.yaml").is_some());
        assert!(asset_str("onboarding.yaml").is_some());
        assert!(asset_str("missing.yaml").is_none());
    }
}
