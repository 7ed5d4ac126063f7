use std::{
    borrow::Borrow,
    fmt,
    path::{self, Path},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// The unique name of one image inside an atlas.
///
/// This is really just a string, but giving it an explicit type keeps names
/// from being confused with paths or other strings, and makes clones cheap
/// since names are shared between the builder, the asset and its manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetName(Arc<str>);

impl AssetName {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        AssetName(name.as_ref().into())
    }

    /// Names an asset by its path relative to `root_path`, always using `/`
    /// as the separator. Returns `None` if `asset_path` isn't inside
    /// `root_path`.
    pub fn from_paths(root_path: &Path, asset_path: &Path) -> Option<Self> {
        let relative = asset_path.strip_prefix(root_path).ok()?;

        let displayed = format!("{}", relative.display());

        // In order to make relative paths behave cross-platform, fix the path
        // separator to always be / on platforms where it isn't the main separator.
        let displayed = if path::MAIN_SEPARATOR == '/' {
            displayed
        } else {
            displayed.replace(path::MAIN_SEPARATOR, "/")
        };

        Some(AssetName(displayed.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AssetName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetName {
    fn from(name: &str) -> Self {
        AssetName(name.into())
    }
}

impl From<String> for AssetName {
    fn from(name: String) -> Self {
        AssetName(name.into())
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
